//! Grouped, bucketed and ranked views over a cleaned dataset.
//!
//! [`analyze`] combines these with the scalar statistics into a single
//! [`AnalysisResult`]. All sorts are stable, so ties keep cleaned-set order.

use super::stats;
use crate::models::{
    ActivityBucket, ActivityLevel, AnalysisResult, CleanRecord, ContributorEntry, IssueTrend,
    LanguageStat, SummaryStats,
};
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

/// Languages kept in the language table.
pub const TOP_LANGUAGES: usize = 10;
/// Contribution opportunities kept.
pub const MAX_CONTRIB_OPS: usize = 5;
/// Repositories kept in the contributor ranking.
pub const TOP_CONTRIBUTORS: usize = 10;
/// Repositories kept in the issue leaderboard.
pub const TOP_ISSUE_TRENDS: usize = 20;
/// |z| above which an issue count is an outlier.
pub const OUTLIER_Z: f64 = 2.0;

/// Derive the full analysis object from a cleaned set.
pub fn analyze(cleaned: &[CleanRecord]) -> AnalysisResult {
    debug!("Analyzing {} cleaned records", cleaned.len());

    AnalysisResult {
        stats: summary_stats(cleaned),
        language_stats: language_stats(cleaned, TOP_LANGUAGES),
        activity_levels: activity_levels(cleaned),
        contrib_ops: contribution_opportunities(cleaned, MAX_CONTRIB_OPS),
        top_contributors: top_contributors(cleaned, TOP_CONTRIBUTORS),
        issue_trends: issue_trends(cleaned, TOP_ISSUE_TRENDS),
    }
}

/// Scalar statistics over stars, forks and issues.
pub fn summary_stats(cleaned: &[CleanRecord]) -> SummaryStats {
    let stars: Vec<f64> = cleaned.iter().map(|r| r.stars_count as f64).collect();
    let forks: Vec<f64> = cleaned.iter().map(|r| r.forks_count as f64).collect();
    let issues: Vec<u64> = cleaned.iter().map(|r| r.issues_count).collect();
    let issues_f: Vec<f64> = issues.iter().map(|&i| i as f64).collect();

    SummaryStats {
        mean_stars: stats::mean(&stars),
        median_issues: stats::upper_median(&issues),
        std_issues: stats::population_std(&issues_f),
        outlier_count: stats::zscore_outliers(&issues_f, OUTLIER_Z),
        corr_stars_forks: stats::pearson(&stars, &forks),
    }
}

/// Repository count and mean stars per language, largest groups first.
///
/// Groups are kept in first-seen order before the stable sort, so equal
/// counts stay in the order their language first appeared.
pub fn language_stats(cleaned: &[CleanRecord], n: usize) -> Vec<LanguageStat> {
    let mut order: Vec<(&str, usize, f64)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for record in cleaned {
        let slot = *slots.entry(record.language.as_str()).or_insert_with(|| {
            order.push((record.language.as_str(), 0, 0.0));
            order.len() - 1
        });
        let group = &mut order[slot];
        group.1 += 1;
        // Star totals can exceed u64 when counts are clamped to u64::MAX
        group.2 += record.stars_count as f64;
    }

    let mut groups: Vec<LanguageStat> = order
        .into_iter()
        .map(|(language, count, stars)| LanguageStat {
            language: language.to_string(),
            repository_count: count,
            mean_stars: stars / count as f64,
        })
        .collect();

    groups.sort_by_key(|g| Reverse(g.repository_count));
    groups.truncate(n);
    groups
}

/// Counts for the three activity buckets, always in Low/Medium/High order.
pub fn activity_levels(cleaned: &[CleanRecord]) -> Vec<ActivityBucket> {
    let mut counts = [0usize; 3];
    for record in cleaned {
        let slot = match ActivityLevel::classify(record.issues_count) {
            ActivityLevel::Low => 0,
            ActivityLevel::Medium => 1,
            ActivityLevel::High => 2,
        };
        counts[slot] += 1;
    }

    ActivityLevel::ALL
        .iter()
        .zip(counts)
        .map(|(level, count)| ActivityBucket {
            level: *level,
            name: level.label().to_string(),
            count,
        })
        .collect()
}

/// Whether a repository has many issues but few pull requests.
pub fn is_contribution_opportunity(record: &CleanRecord) -> bool {
    record.issues_count > 50 && record.pull_requests < 10
}

/// First `n` contribution opportunities in cleaned-set order.
pub fn contribution_opportunities(cleaned: &[CleanRecord], n: usize) -> Vec<CleanRecord> {
    cleaned
        .iter()
        .filter(|r| is_contribution_opportunity(r))
        .take(n)
        .cloned()
        .collect()
}

/// Top `n` repositories by contributor count.
pub fn top_contributors(cleaned: &[CleanRecord], n: usize) -> Vec<ContributorEntry> {
    let mut sorted: Vec<&CleanRecord> = cleaned.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.contributors));
    sorted.truncate(n);

    sorted
        .into_iter()
        .map(|r| ContributorEntry {
            repositories: r.repositories.clone(),
            contributors: r.contributors,
        })
        .collect()
}

/// Top `n` repositories by issue count, ranked from 1.
pub fn issue_trends(cleaned: &[CleanRecord], n: usize) -> Vec<IssueTrend> {
    let mut sorted: Vec<&CleanRecord> = cleaned.iter().collect();
    sorted.sort_by_key(|r| Reverse(r.issues_count));

    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, r)| IssueTrend {
            rank: i + 1,
            repositories: r.repositories.clone(),
            issues_count: r.issues_count,
        })
        .collect()
}
