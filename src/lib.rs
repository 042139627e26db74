//! Title-Harvest: a catalog title page scraper
//!
//! This crate fetches per-title detail pages from a content catalog site by
//! stable identifier, extracts a fixed set of structured fields from each
//! page (embedded JSON-LD first, rendered markup second), and emits one
//! normalized record per identifier plus an aggregate run summary.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Title-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// `NoValidIds` is the only fatal per-run condition: it aborts before any
/// network activity with a distinct exit status.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read id list: {0}")]
    Io(#[from] std::io::Error),

    #[error("No valid title ids in {path} (expected lines like 'tt0111161')")]
    NoValidIds { path: PathBuf },
}

/// Result type alias for Title-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{read_ids, CrawlConfig, TitleId};
pub use crawler::{Harvester, Outcome, RunReport, TransportError};
pub use record::Record;
