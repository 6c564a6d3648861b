//! Deduplication and field normalization.

use crate::models::{CleanRecord, RawRecord};
use std::collections::HashSet;
use tracing::{debug, info};

/// Literal used by the dataset to mark a missing value.
pub const NULL_SENTINEL: &str = "NULL";

/// Language recorded when the input holds the sentinel.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Clean raw rows into typed records.
///
/// The first row for each repository identifier wins and input order is
/// kept. Malformed fields never fail the row; they fall back to `0` or
/// `"Unknown"`.
pub fn clean(raw: &[RawRecord]) -> Vec<CleanRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(raw.len());

    let cleaned: Vec<CleanRecord> = raw
        .iter()
        .filter(|&row| seen.insert(row.repositories.as_str()))
        .map(clean_record)
        .collect();

    info!("Total raw rows: {}", raw.len());
    info!("Total cleaned rows: {}", cleaned.len());
    if cleaned.len() < raw.len() {
        debug!("Dropped {} duplicate rows", raw.len() - cleaned.len());
    }

    cleaned
}

/// Normalize a single row.
pub fn clean_record(row: &RawRecord) -> CleanRecord {
    CleanRecord {
        repositories: row.repositories.clone(),
        stars_count: parse_count(&row.stars_count),
        forks_count: parse_count(&row.forks_count),
        issues_count: parse_count(&row.issues_count),
        pull_requests: parse_count(&row.pull_requests),
        contributors: if row.contributors == NULL_SENTINEL {
            0
        } else {
            parse_count(&row.contributors)
        },
        language: if row.language == NULL_SENTINEL {
            UNKNOWN_LANGUAGE.to_string()
        } else {
            row.language.clone()
        },
    }
}

/// Parse a count, falling back to 0.
///
/// Surrounding whitespace is ignored. Decimal or exponent text is
/// truncated toward zero and values beyond `u64::MAX` are clamped to it.
/// Negative, NaN and infinite values count as unparsable, as does hex
/// text such as `0x1A`.
pub fn parse_count(value: &str) -> u64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }

    if let Ok(n) = value.parse::<u64>() {
        return n;
    }

    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => {
            if n >= u64::MAX as f64 {
                debug!("Count `{}` exceeds u64, clamped to {}", value, u64::MAX);
            }
            n.trunc() as u64
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, stars: &str) -> RawRecord {
        RawRecord {
            repositories: id.to_string(),
            stars_count: stars.to_string(),
            forks_count: "0".to_string(),
            issues_count: "0".to_string(),
            pull_requests: "0".to_string(),
            contributors: "0".to_string(),
            language: "Rust".to_string(),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let rows = vec![raw("a", "1"), raw("a", "2")];
        let cleaned = clean(&rows);

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].repositories, "a");
        assert_eq!(cleaned[0].stars_count, 1);
    }

    #[test]
    fn test_dedup_keeps_input_order() {
        let rows = vec![raw("b", "1"), raw("a", "2"), raw("b", "3"), raw("c", "4")];
        let ids: Vec<String> = clean(&rows).into_iter().map(|r| r.repositories).collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sentinel_handling() {
        let row = RawRecord {
            contributors: "NULL".to_string(),
            language: "NULL".to_string(),
            ..raw("x", "5")
        };
        let cleaned = clean_record(&row);

        assert_eq!(cleaned.contributors, 0);
        assert_eq!(cleaned.language, "Unknown");
    }

    #[test]
    fn test_empty_language_passes_through() {
        let row = RawRecord {
            language: String::new(),
            ..raw("x", "5")
        };
        assert_eq!(clean_record(&row).language, "");

        let row = RawRecord {
            language: "null".to_string(),
            ..raw("x", "5")
        };
        assert_eq!(clean_record(&row).language, "null");
    }

    #[test]
    fn test_unparsable_counts_default_to_zero() {
        let row = RawRecord {
            repositories: "x".to_string(),
            stars_count: "lots".to_string(),
            forks_count: "NULL".to_string(),
            issues_count: String::new(),
            pull_requests: "-4".to_string(),
            contributors: "n/a".to_string(),
            language: "C".to_string(),
        };
        let cleaned = clean_record(&row);

        assert_eq!(cleaned.stars_count, 0);
        assert_eq!(cleaned.forks_count, 0);
        assert_eq!(cleaned.issues_count, 0);
        assert_eq!(cleaned.pull_requests, 0);
        assert_eq!(cleaned.contributors, 0);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), 42);
        assert_eq!(parse_count(" 42 "), 42);
        assert_eq!(parse_count("+7"), 7);
        assert_eq!(parse_count("12.9"), 12);
        assert_eq!(parse_count("1e3"), 1000);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count("NaN"), 0);
        assert_eq!(parse_count("inf"), 0);
    }

    #[test]
    fn test_parse_count_out_of_range() {
        assert_eq!(parse_count("1e20"), u64::MAX);
        assert_eq!(parse_count("99999999999999999999999"), u64::MAX);
        assert_eq!(parse_count("0x1A"), 0);
    }

    #[test]
    fn test_clean_empty() {
        assert!(clean(&[]).is_empty());
    }
}
