use std::time::Duration;

/// Base URL that title ids are appended to when building page URLs
pub const DEFAULT_BASE_URL: &str = "https://www.imdb.com/title";

/// Fixed browser-like User-Agent; catalog sites block obvious bot agents
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Crawl behavior configuration
///
/// Defaults match the command-line defaults: 1.5s between requests, 15s
/// per-request timeout, 3 attempts with a 0.5s backoff seed.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Base URL for title pages (`<base>/<id>/`)
    pub base_url: String,

    /// Fixed delay between requests, applied after every identifier
    pub delay: Duration,

    /// Per-request timeout
    pub timeout: Duration,

    /// Total attempt count for transient failures (first try included)
    pub max_attempts: u32,

    /// Backoff seed; retry n sleeps `backoff_factor * 2^(n-1)`
    pub backoff_factor: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay: Duration::from_millis(1500),
            timeout: Duration::from_secs(15),
            max_attempts: 3,
            backoff_factor: Duration::from_millis(500),
        }
    }
}

impl CrawlConfig {
    /// Builds the page URL for a title id
    pub fn title_url(&self, id: &super::TitleId) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), id)
    }
}
