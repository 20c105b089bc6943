use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cli::GenerateArgs;
use crate::commands::inventory::{self, OUTPUT_DIR_NAME};
use crate::model::{DocumentFailure, GenerateCounts, GeneratePaths, GenerateRunManifest};
use crate::util::{now_utc_string, read_lines, utc_compact_string, write_json_pretty, write_lines};

mod batch;
mod category;
mod code_block;
mod record;
mod run;
mod sections;
mod statement;
#[cfg(test)]
mod tests;

pub use category::category_id_for_path;
pub use run::run;
pub use statement::INSERT_PREFIX;

use batch::*;
use category::*;
use code_block::*;
use record::*;
use sections::*;
use statement::*;
