use std::collections::HashSet;
use std::fmt;
use std::fs;

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::commands::generate::INSERT_PREFIX;
use crate::util::{now_utc_string, write_json_pretty};

mod checks;
mod report;
mod run;

pub use run::run;

use checks::*;
use report::*;

/// Errors beyond this count are summarised instead of printed.
const MAX_DISPLAYED_ERRORS: usize = 20;
