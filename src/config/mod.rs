//! Configuration module for Title-Harvest
//!
//! This module holds the crawl configuration (base URL, politeness delay,
//! timeouts, retry tuning) and the identifier-list input handling.

mod ids;
mod types;

pub use ids::{read_ids, TitleId, ID_PREFIX};
pub use types::{CrawlConfig, DEFAULT_BASE_URL, USER_AGENT};
