//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Largest cleaned-data preview the report will render.
const MAX_TABLE_ROWS: usize = 10_000;

/// RepoStats - descriptive statistics for GitHub repository datasets
///
/// Loads a CSV of repositories, removes duplicates, normalizes missing
/// values and reports summary statistics, language breakdowns, activity
/// levels and rankings as Markdown or JSON.
///
/// Examples:
///   repostats --input github_dataset.csv
///   repostats --input github_dataset.csv --format json --output stats.json
///   repostats --input github_dataset.csv --export cleaned.csv
///   repostats --input github_dataset.csv --dry-run
///   repostats --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the repository dataset (CSV with a header row)
    ///
    /// Defaults to the config file value, or github_dataset.csv.
    #[arg(short, long, value_name = "FILE", env = "REPOSTATS_INPUT")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Also write the cleaned dataset as CSV to this path
    ///
    /// Values are written unquoted, in the input column order.
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .repostats.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Rows shown in the cleaned data preview (0 hides it)
    #[arg(long, value_name = "ROWS")]
    pub table_rows: Option<usize>,

    /// Leave the methodology section out of the Markdown report
    #[arg(long)]
    pub no_methodology: bool,

    /// Exit with code 2 when any issue-count outliers are found
    #[arg(long)]
    pub fail_on_outliers: bool,

    /// Dry run: load and clean the dataset, print row counts and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .repostats.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref input) = self.input {
            if input.as_os_str().is_empty() {
                return Err("Input path must not be empty".to_string());
            }
        }

        if let Some(rows) = self.table_rows {
            if rows > MAX_TABLE_ROWS {
                return Err(format!("Table rows must be at most {}", MAX_TABLE_ROWS));
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `config_verbose` is the `[general] verbose` setting; `--quiet` wins
    /// over both.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
