//! Data models for the repository statistics pipeline.
//!
//! This module contains the record types produced by the loader and
//! cleaner, the derived analysis object, and the report wrapper consumed
//! by the report generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column order shared by the input dataset and the cleaned export.
pub const COLUMNS: [&str; 7] = [
    "repositories",
    "stars_count",
    "forks_count",
    "issues_count",
    "pull_requests",
    "contributors",
    "language",
];

/// One row of the input dataset, exactly as received.
///
/// Every field is kept as text; coercion happens in the cleaner. Columns
/// absent from a row deserialize as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub repositories: String,
    pub stars_count: String,
    pub forks_count: String,
    pub issues_count: String,
    pub pull_requests: String,
    pub contributors: String,
    pub language: String,
}

/// A normalized, deduplicated repository observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanRecord {
    /// Repository identifier, unique within a cleaned set.
    pub repositories: String,
    pub stars_count: u64,
    pub forks_count: u64,
    pub issues_count: u64,
    pub pull_requests: u64,
    pub contributors: u64,
    /// Primary language, `"Unknown"` when the input held the sentinel.
    pub language: String,
}

/// Issue-count activity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Fewer than 50 open issues
    Low,
    /// Between 50 and 100 open issues, inclusive
    Medium,
    /// More than 100 open issues
    High,
}

impl ActivityLevel {
    /// All levels in display order.
    pub const ALL: [ActivityLevel; 3] = [ActivityLevel::Low, ActivityLevel::Medium, ActivityLevel::High];

    /// Classify an issue count into its bucket.
    pub fn classify(issues: u64) -> Self {
        match issues {
            0..=49 => ActivityLevel::Low,
            50..=100 => ActivityLevel::Medium,
            _ => ActivityLevel::High,
        }
    }

    /// Returns the label shown next to the bucket count.
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Low => "Low (<50 issues)",
            ActivityLevel::Medium => "Medium (50-100 issues)",
            ActivityLevel::High => "High (>100 issues)",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Low => write!(f, "Low"),
            ActivityLevel::Medium => write!(f, "Medium"),
            ActivityLevel::High => write!(f, "High"),
        }
    }
}

/// Scalar summary statistics over the cleaned set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean_stars: f64,
    /// Element at index `n / 2` of the ascending issue counts.
    pub median_issues: u64,
    /// Population standard deviation of issue counts.
    pub std_issues: f64,
    /// Records whose issue-count z-score exceeds 2 in magnitude.
    pub outlier_count: usize,
    pub corr_stars_forks: f64,
}

/// Per-language aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageStat {
    pub language: String,
    pub repository_count: usize,
    pub mean_stars: f64,
}

/// Count of repositories in one activity bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBucket {
    pub level: ActivityLevel,
    pub name: String,
    pub count: usize,
}

/// Projection used by the contributor ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributorEntry {
    pub repositories: String,
    pub contributors: u64,
}

/// A ranked entry of the issue-count leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueTrend {
    /// 1-based position.
    pub rank: usize,
    pub repositories: String,
    pub issues_count: u64,
}

/// Everything derived from a cleaned set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub stats: SummaryStats,
    pub language_stats: Vec<LanguageStat>,
    pub activity_levels: Vec<ActivityBucket>,
    /// Busy repositories with few pull requests, a good place to help out.
    pub contrib_ops: Vec<CleanRecord>,
    pub top_contributors: Vec<ContributorEntry>,
    pub issue_trends: Vec<IssueTrend>,
}

impl AnalysisResult {
    /// Average of the per-language star means over the reported languages.
    pub fn avg_stars_per_language(&self) -> f64 {
        if self.language_stats.is_empty() {
            return 0.0;
        }
        let total: f64 = self.language_stats.iter().map(|l| l.mean_stars).sum();
        total / self.language_stats.len() as f64
    }

    /// Total of the activity bucket counts.
    pub fn bucketed_total(&self) -> usize {
        self.activity_levels.iter().map(|b| b.count).sum()
    }
}

/// Metadata about a report run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path of the dataset that was loaded.
    pub input: String,
    /// Date and time of the analysis.
    pub analysis_date: DateTime<Utc>,
    /// Rows read from the dataset.
    pub raw_rows: usize,
    /// Rows left after deduplication.
    pub cleaned_rows: usize,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
}

impl ReportMetadata {
    /// Number of rows dropped as duplicates.
    pub fn duplicates_removed(&self) -> usize {
        self.raw_rows.saturating_sub(self.cleaned_rows)
    }
}

/// The complete statistics report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub analysis: AnalysisResult,
    /// The cleaned dataset the analysis was computed from.
    pub cleaned_data: Vec<CleanRecord>,
}

impl Report {
    /// Creates a report from the pipeline outputs.
    pub fn new(metadata: ReportMetadata, analysis: AnalysisResult, cleaned_data: Vec<CleanRecord>) -> Self {
        Self {
            metadata,
            analysis,
            cleaned_data,
        }
    }
}
