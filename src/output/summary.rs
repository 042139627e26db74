//! Aggregate run summary
//!
//! Pure aggregation over the finalized record table: counts, rating
//! mean/median over present values, and frequency-ranked genres. Tolerates
//! an empty table; statistics degrade to null/zero rather than failing.

use crate::record::Record;
use crate::Result;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// At most this many genres appear in the summary
pub const TOP_GENRES_LIMIT: usize = 10;

/// Aggregate statistics for one run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Number of records in the table
    pub n_titles: usize,

    /// Mean of present rating values; null when none
    pub rating_mean: Option<f64>,

    /// Median of present rating values; null when none
    pub rating_median: Option<f64>,

    /// Genre occurrence counts, descending, at most [`TOP_GENRES_LIMIT`]
    #[serde(serialize_with = "counts_as_map")]
    pub top_genres: Vec<(String, u64)>,

    /// Records with a non-absent director list
    pub n_with_directors: usize,
}

/// Serializes ordered (genre, count) pairs as a JSON mapping, preserving
/// the descending-by-count order.
fn counts_as_map<S: Serializer>(entries: &[(String, u64)], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (genre, count) in entries {
        map.serialize_entry(genre, count)?;
    }
    map.end()
}

/// Computes the run summary over the accumulated records
pub fn summarize(records: &[Record]) -> RunSummary {
    let mut ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    ratings.sort_by(f64::total_cmp);

    let rating_mean = if ratings.is_empty() {
        None
    } else {
        Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
    };

    let rating_median = median(&ratings);

    // Genre text may itself be comma-joined; split before counting.
    let mut counts: HashMap<String, u64> = HashMap::new();
    for record in records {
        for genre in record.genres.iter().flatten() {
            for part in genre.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                *counts.entry(part.to_string()).or_insert(0) += 1;
            }
        }
    }

    let mut top_genres: Vec<(String, u64)> = counts.into_iter().collect();
    // Descending by count; name ascending keeps ties deterministic
    top_genres.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_genres.truncate(TOP_GENRES_LIMIT);

    RunSummary {
        n_titles: records.len(),
        rating_mean,
        rating_median,
        top_genres,
        n_with_directors: records.iter().filter(|r| r.directors.is_some()).count(),
    }
}

fn median(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Writes the summary as pretty JSON, creating parent directories as needed
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    Ok(())
}
