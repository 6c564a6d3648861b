//! RepoStats - GitHub repository dataset statistics
//!
//! A CLI tool that cleans a CSV dataset of GitHub repositories and
//! reports descriptive statistics, language breakdowns, activity levels
//! and rankings.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable dataset, bad config, write failure, etc.)
//!   2 - Outliers found and --fail-on-outliers set

mod analysis;
mod cli;
mod config;
mod dataset;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE};
use models::{Report, ReportMetadata};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load configuration before logging, it can turn on verbose output
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("RepoStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    match run(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .repostats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the dataset path, export path and report options.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run the load, clean, analyze and report workflow. Returns exit code (0 or 2).
fn run(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    // Step 1: Load the dataset
    let input = PathBuf::from(&config.data.input);
    if !args.quiet {
        println!("📥 Loading dataset: {}", input.display());
    }
    let raw = dataset::load_dataset(&input)
        .with_context(|| format!("Failed to load dataset {}", input.display()))?;

    // Step 2: Clean
    let cleaned = dataset::clean(&raw);

    if args.dry_run {
        return handle_dry_run(raw.len(), cleaned.len());
    }

    // Step 3: Analyze
    if !args.quiet {
        println!("🔬 Analyzing {} repositories...", cleaned.len());
    }
    let analysis = analysis::analyze(&cleaned);
    debug!(
        "Bucketed {} of {} repositories by activity",
        analysis.bucketed_total(),
        cleaned.len()
    );

    // Step 4: Optional cleaned export
    if let Some(ref export) = config.data.export {
        dataset::write_cleaned_csv(&cleaned, Path::new(export))?;
        if !args.quiet {
            println!("💾 Cleaned dataset exported to: {}", export);
        }
    }

    // Step 5: Build and save the report
    let metadata = ReportMetadata {
        input: input.display().to_string(),
        analysis_date: Utc::now(),
        raw_rows: raw.len(),
        cleaned_rows: cleaned.len(),
        duration_seconds: start_time.elapsed().as_secs_f64(),
    };
    let report = Report::new(metadata, analysis, cleaned);

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report, &config.report),
    };

    let output_path = resolve_output_path(&args, &config);
    std::fs::write(&output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    let stats = &report.analysis.stats;
    if !args.quiet {
        println!("\n📊 Analysis Summary:");
        println!(
            "   Repositories: {} ({} duplicates removed)",
            report.metadata.cleaned_rows,
            report.metadata.duplicates_removed()
        );
        println!("   Mean stars: {:.2}", stats.mean_stars);
        println!(
            "   Median issues: {} | Std dev: {:.2} | Outliers: {}",
            stats.median_issues, stats.std_issues, stats.outlier_count
        );
        println!("   Stars/forks correlation: {:.4}", stats.corr_stars_forks);
        println!(
            "\n✅ Analysis complete! Report saved to: {}",
            output_path.display()
        );
    }

    if args.fail_on_outliers && stats.outlier_count > 0 {
        eprintln!(
            "\n⛔ {} issue-count outliers found. Failing (exit code 2).",
            stats.outlier_count
        );
        return Ok(2);
    }

    Ok(0)
}

/// Handle --dry-run: report row counts without analyzing.
fn handle_dry_run(raw_rows: usize, cleaned_rows: usize) -> Result<i32> {
    println!("\n🔍 Dry run: dataset loaded and cleaned, no report written.\n");
    println!("   Raw rows: {}", raw_rows);
    println!("   Cleaned rows: {}", cleaned_rows);
    println!("   Duplicates removed: {}", raw_rows.saturating_sub(cleaned_rows));
    Ok(0)
}

/// Pick the report path, switching the default extension for JSON output.
fn resolve_output_path(args: &Args, config: &Config) -> PathBuf {
    let path = PathBuf::from(&config.general.output);

    if args.output.is_none() && args.format == OutputFormat::Json {
        if path.extension().and_then(|e| e.to_str()) == Some("md") {
            return path.with_extension("json");
        }
    }

    path
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE, e);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_path_json_default() {
        let args = Args {
            format: OutputFormat::Json,
            ..Args::default()
        };
        let path = resolve_output_path(&args, &Config::default());
        assert_eq!(path, PathBuf::from("repostats_report.json"));
    }

    #[test]
    fn test_resolve_output_path_explicit() {
        let args = Args {
            format: OutputFormat::Json,
            output: Some(PathBuf::from("out.md")),
            ..Args::default()
        };
        let mut config = Config::default();
        config.merge_with_args(&args);

        let path = resolve_output_path(&args, &config);
        assert_eq!(path, PathBuf::from("out.md"));
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let data = "repositories,stars_count,forks_count,issues_count,pull_requests,contributors,language\n\
                    a,1,1,10,0,3,Rust\n\
                    a,2,2,20,0,4,Rust\n\
                    b,3,3,60,5,NULL,NULL\n";
        let raw = dataset::loader::parse_csv(data.as_bytes()).unwrap();
        let cleaned = dataset::clean(&raw);
        let analysis = analysis::analyze(&cleaned);

        assert_eq!(raw.len(), 3);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].stars_count, 1);
        assert_eq!(cleaned[1].language, "Unknown");
        assert_eq!(analysis.stats.median_issues, 60);
        assert_eq!(analysis.bucketed_total(), 2);
        assert_eq!(analysis.contrib_ops.len(), 1);
        assert_eq!(analysis.contrib_ops[0].repositories, "b");
        assert_eq!(analysis.language_stats[0].language, "Rust");
    }

    #[test]
    fn test_fixture_dataset() {
        let raw = dataset::load_dataset(Path::new(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/github_dataset.csv"
        )))
        .unwrap();
        let cleaned = dataset::clean(&raw);
        let analysis = analysis::analyze(&cleaned);

        assert_eq!(raw.len(), 7);
        assert_eq!(cleaned.len(), 6);
        assert_eq!(cleaned[0].stars_count, 120);
        assert_eq!(cleaned[4].language, "");

        assert_eq!(analysis.stats.mean_stars, 40.0);
        assert_eq!(analysis.stats.median_issues, 75);

        let counts: Vec<usize> = analysis.activity_levels.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 2]);

        let ops: Vec<&str> = analysis
            .contrib_ops
            .iter()
            .map(|r| r.repositories.as_str())
            .collect();
        assert_eq!(ops, vec!["octo/alpha", "octo/gamma", "octo/zeta"]);

        assert_eq!(analysis.language_stats[0].language, "Python");
        assert_eq!(analysis.language_stats[0].repository_count, 2);
        assert_eq!(analysis.language_stats[0].mean_stars, 57.5);
        assert_eq!(analysis.language_stats[1].language, "Rust");

        assert_eq!(analysis.top_contributors[0].repositories, "octo/alpha");
        assert_eq!(analysis.top_contributors[5].contributors, 0);
        assert_eq!(analysis.issue_trends[0].issues_count, 130);
        assert_eq!(analysis.issue_trends[5].rank, 6);
    }
}
