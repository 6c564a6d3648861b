//! Markdown and JSON report generation.
//!
//! This module renders the cleaned dataset and its analysis into a
//! human-readable Markdown document, or a JSON payload for other tools.

use crate::config::ReportConfig;
use crate::models::{
    ActivityBucket, AnalysisResult, CleanRecord, ContributorEntry, IssueTrend, LanguageStat,
    Report, ReportMetadata, SummaryStats,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report, options: &ReportConfig) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# GitHub Repository Statistics\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_table_of_contents(report, options));
    output.push_str(&generate_summary_section(
        &report.analysis,
        report.cleaned_data.len(),
    ));
    output.push_str(&generate_language_section(&report.analysis.language_stats));
    output.push_str(&generate_activity_section(&report.analysis.activity_levels));
    output.push_str(&generate_opportunities_section(&report.analysis.contrib_ops));
    output.push_str(&generate_contributors_section(
        &report.analysis.top_contributors,
    ));
    output.push_str(&generate_issue_trends_section(&report.analysis.issue_trends));

    if options.include_cleaned_table && options.table_rows > 0 {
        output.push_str(&generate_cleaned_data_section(
            &report.cleaned_data,
            options.table_rows,
        ));
    }

    if options.include_methodology {
        output.push_str(&generate_methodology_section());
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Dataset:** `{}`\n", metadata.input));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Raw Rows:** {}\n", metadata.raw_rows));
    section.push_str(&format!("- **Cleaned Rows:** {}\n", metadata.cleaned_rows));
    if metadata.duplicates_removed() > 0 {
        section.push_str(&format!(
            "- **Duplicates Removed:** {}\n",
            metadata.duplicates_removed()
        ));
    }
    section.push_str(&format!(
        "- **Analysis Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the table of contents.
fn generate_table_of_contents(report: &Report, options: &ReportConfig) -> String {
    let mut toc = String::new();

    toc.push_str("## Table of Contents\n\n");
    toc.push_str("- [Metadata](#metadata)\n");
    toc.push_str("- [Summary Statistics](#summary-statistics)\n");
    toc.push_str("- [Languages](#languages)\n");
    toc.push_str("- [Activity Levels](#activity-levels)\n");
    toc.push_str("- [Contribution Opportunities](#contribution-opportunities)\n");
    toc.push_str("- [Top Contributors](#top-contributors)\n");
    toc.push_str("- [Issue Trends](#issue-trends)\n");

    if options.include_cleaned_table && options.table_rows > 0 && !report.cleaned_data.is_empty()
    {
        toc.push_str("- [Cleaned Data](#cleaned-data)\n");
    }
    if options.include_methodology {
        toc.push_str("- [Methodology](#methodology)\n");
    }

    toc.push('\n');

    toc
}

/// Generate the summary statistics section.
fn generate_summary_section(analysis: &AnalysisResult, total: usize) -> String {
    let SummaryStats {
        mean_stars,
        median_issues,
        std_issues,
        outlier_count,
        corr_stars_forks,
    } = analysis.stats;

    let mut section = String::new();

    section.push_str("## Summary Statistics\n\n");
    section.push_str("| Metric | Value |\n");
    section.push_str("|:---|---:|\n");
    section.push_str(&format!("| Total Repositories | {} |\n", total));
    section.push_str(&format!("| Mean Stars | {:.2} |\n", mean_stars));
    section.push_str(&format!("| Median Issues | {} |\n", median_issues));
    section.push_str(&format!("| Std Dev of Issues | {:.2} |\n", std_issues));
    section.push_str(&format!("| Outliers (Issues > 2σ) | {} |\n", outlier_count));
    section.push_str(&format!(
        "| Stars/Forks Correlation | {:.4} |\n",
        corr_stars_forks
    ));
    section.push_str(&format!(
        "| Average Stars per Language | {:.2} |\n",
        analysis.avg_stars_per_language()
    ));
    section.push('\n');

    section
}

/// Generate the language breakdown section.
fn generate_language_section(languages: &[LanguageStat]) -> String {
    let mut section = String::new();

    section.push_str("## Languages\n\n");

    if languages.is_empty() {
        section.push_str("No repositories to group.\n\n");
        return section;
    }

    section.push_str("| Language | Repositories | Mean Stars |\n");
    section.push_str("|:---|:---:|---:|\n");
    for lang in languages {
        section.push_str(&format!(
            "| {} | {} | {:.2} |\n",
            display_language(&lang.language),
            lang.repository_count,
            lang.mean_stars
        ));
    }
    section.push('\n');

    section
}

/// Generate the activity bucket section.
fn generate_activity_section(buckets: &[ActivityBucket]) -> String {
    let mut section = String::new();

    section.push_str("## Activity Levels\n\n");
    section.push_str("| Level | Repositories |\n");
    section.push_str("|:---|:---:|\n");
    for bucket in buckets {
        section.push_str(&format!("| {} | {} |\n", bucket.name, bucket.count));
    }
    section.push('\n');

    section
}

/// Generate the contribution opportunities section.
fn generate_opportunities_section(ops: &[CleanRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Contribution Opportunities\n\n");
    section.push_str("*Repositories with more than 50 issues and fewer than 10 pull requests.*\n\n");

    if ops.is_empty() {
        section.push_str("No repositories matched.\n\n");
        return section;
    }

    section.push_str("| Repository | Issues | Pull Requests | Language |\n");
    section.push_str("|:---|:---:|:---:|:---|\n");
    for op in ops {
        section.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            op.repositories,
            op.issues_count,
            op.pull_requests,
            display_language(&op.language)
        ));
    }
    section.push('\n');

    section
}

/// Generate the contributor ranking section.
fn generate_contributors_section(entries: &[ContributorEntry]) -> String {
    let mut section = String::new();

    section.push_str("## Top Contributors\n\n");

    if entries.is_empty() {
        section.push_str("No repositories to rank.\n\n");
        return section;
    }

    section.push_str("| Repository | Contributors |\n");
    section.push_str("|:---|:---:|\n");
    for entry in entries {
        section.push_str(&format!(
            "| `{}` | {} |\n",
            entry.repositories, entry.contributors
        ));
    }
    section.push('\n');

    section
}

/// Generate the issue leaderboard section.
fn generate_issue_trends_section(trends: &[IssueTrend]) -> String {
    let mut section = String::new();

    section.push_str("## Issue Trends\n\n");

    if trends.is_empty() {
        section.push_str("No repositories to rank.\n\n");
        return section;
    }

    section.push_str("| Rank | Repository | Issues |\n");
    section.push_str("|:---:|:---|:---:|\n");
    for trend in trends {
        section.push_str(&format!(
            "| {} | `{}` | {} |\n",
            trend.rank, trend.repositories, trend.issues_count
        ));
    }
    section.push('\n');

    section
}

/// Generate a preview of the cleaned dataset.
fn generate_cleaned_data_section(records: &[CleanRecord], rows: usize) -> String {
    if records.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Cleaned Data\n\n");
    section.push_str("| Repository | Stars | Forks | Issues | Pull Requests | Contributors | Language |\n");
    section.push_str("|:---|---:|---:|---:|---:|---:|:---|\n");

    for record in records.iter().take(rows) {
        section.push_str(&format!(
            "| `{}` | {} | {} | {} | {} | {} | {} |\n",
            record.repositories,
            record.stars_count,
            record.forks_count,
            record.issues_count,
            record.pull_requests,
            record.contributors,
            display_language(&record.language)
        ));
    }

    if records.len() > rows {
        section.push_str(&format!(
            "\n*Showing {} of {} repositories.*\n",
            rows,
            records.len()
        ));
    }
    section.push('\n');

    section
}

/// Generate the methodology section.
fn generate_methodology_section() -> String {
    let mut section = String::new();

    section.push_str("## Methodology\n\n");
    section.push_str(
        "1. **Load:** the CSV dataset is read in full; columns are matched by header name.\n",
    );
    section.push_str(
        "2. **Clean:** duplicate repositories are dropped (first occurrence kept), `NULL` languages become `Unknown`, `NULL` contributors become 0, and unparsable counts become 0.\n",
    );
    section.push_str(
        "3. **Statistics:** mean stars, median issues (the middle element, upper one for an even count), population standard deviation of issues, z-score outliers (|z| > 2), and the Pearson correlation between stars and forks.\n",
    );
    section.push_str(
        "4. **Languages:** repositories are grouped by language; the ten largest groups are listed with their mean stars.\n",
    );
    section.push_str(
        "5. **Activity:** repositories are bucketed by issue count into Low (<50), Medium (50-100) and High (>100).\n",
    );
    section.push_str(
        "6. **Rankings:** contribution opportunities, top contributors and issue trends are taken from the cleaned set; ties keep dataset order.\n",
    );
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by repostats v{}*\n",
        env!("CARGO_PKG_VERSION")
    ));

    footer
}

/// Markdown tables collapse empty cells, so show a placeholder.
fn display_language(language: &str) -> &str {
    if language.is_empty() {
        "(none)"
    } else {
        language
    }
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
