use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_SQL_PATH: &str = "fill_help_tables.sql";
pub const DEFAULT_BASE_URL: &str = "https://mariadb.com/docs/";
pub const DEFAULT_START_TOPIC_ID: u32 = 1000;
pub const DEFAULT_MIN_STATEMENTS: usize = 500;

#[derive(Parser, Debug)]
#[command(
    name = "helptopics",
    version,
    about = "Convert markdown reference docs into help_topic INSERT statements"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List markdown sources with their hashes and category codes
    Inventory(InventoryArgs),
    /// Extract help topics and write the SQL file
    Generate(GenerateArgs),
    /// Check a generated SQL file for structural problems
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".")]
    pub docs_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long, default_value = ".")]
    pub docs_root: PathBuf,

    #[arg(long, default_value = DEFAULT_SQL_PATH)]
    pub output: PathBuf,

    #[arg(long)]
    pub failures_path: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value_t = DEFAULT_START_TOPIC_ID)]
    pub start_id: u32,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(default_value = DEFAULT_SQL_PATH)]
    pub sql_path: PathBuf,

    #[arg(long, default_value_t = DEFAULT_MIN_STATEMENTS)]
    pub min_statements: usize,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}
