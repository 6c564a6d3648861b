//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.repostats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".repostats.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default output file path.
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            verbose: false,
        }
    }
}

fn default_output() -> String {
    "repostats_report.md".to_string()
}

/// Dataset input and export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path of the repository CSV.
    #[serde(default = "default_input")]
    pub input: String,

    /// Where to write the cleaned CSV, if anywhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            export: None,
        }
    }
}

fn default_input() -> String {
    "github_dataset.csv".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Include the methodology section.
    #[serde(default = "default_true")]
    pub include_methodology: bool,

    /// Include a preview table of the cleaned dataset.
    #[serde(default = "default_true")]
    pub include_cleaned_table: bool,

    /// Rows shown in the cleaned dataset preview.
    #[serde(default = "default_table_rows")]
    pub table_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_methodology: true,
            include_cleaned_table: true,
            table_rows: default_table_rows(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_table_rows() -> usize {
    20
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref input) = args.input {
            self.data.input = input.display().to_string();
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
        if let Some(ref export) = args.export {
            self.data.export = Some(export.display().to_string());
        }

        if let Some(rows) = args.table_rows {
            self.report.table_rows = rows;
        }
        if args.no_methodology {
            self.report.include_methodology = false;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.output, "repostats_report.md");
        assert_eq!(config.data.input, "github_dataset.csv");
        assert!(config.data.export.is_none());
        assert_eq!(config.report.table_rows, 20);
        assert!(config.report.include_methodology);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
output = "stats.md"
verbose = true

[data]
input = "data/repos.csv"
export = "data/cleaned.csv"

[report]
table_rows = 5
include_methodology = false
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.output, "stats.md");
        assert!(config.general.verbose);
        assert_eq!(config.data.input, "data/repos.csv");
        assert_eq!(config.data.export.as_deref(), Some("data/cleaned.csv"));
        assert_eq!(config.report.table_rows, 5);
        assert!(!config.report.include_methodology);
        assert!(config.report.include_cleaned_table);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\ninput = \"other.csv\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.data.input, "other.csv");
        assert_eq!(config.general.output, "repostats_report.md");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[report]\ntable_rows = \"many\"").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_merge_with_args() {
        let mut config = Config::default();
        let args = Args {
            input: Some(PathBuf::from("cli.csv")),
            table_rows: Some(3),
            no_methodology: true,
            ..Args::default()
        };

        config.merge_with_args(&args);

        assert_eq!(config.data.input, "cli.csv");
        assert_eq!(config.general.output, "repostats_report.md");
        assert_eq!(config.report.table_rows, 3);
        assert!(!config.report.include_methodology);
    }

    #[test]
    fn test_verbose_from_file_sets_log_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nverbose = true").unwrap();

        let mut config = Config::load(file.path()).unwrap();
        let args = Args::default();
        config.merge_with_args(&args);

        assert!(config.general.verbose);
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[report]"));
    }
}
