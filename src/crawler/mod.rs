//! Crawler module for title page fetching and processing
//!
//! This module contains the core harvest logic:
//! - HTTP fetching with retry and backoff
//! - Title page parsing into normalized records
//! - The sequential, rate-limited crawl loop

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Harvester, Outcome, RunReport};
pub use fetcher::{
    build_http_client, fetch_with_retry, is_idempotent, is_retryable_status, FetchedPage,
    RetryPolicy, TransportError,
};
pub use parser::{parse_title_page, ParsedTitle};
