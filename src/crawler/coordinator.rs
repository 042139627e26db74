//! Harvest coordinator - the sequential crawl loop
//!
//! Iterates identifiers strictly in input order, fetches each page through
//! the retrying transport, parses it, and accumulates records. Per-item
//! failures are isolated: every identifier reaches exactly one terminal
//! outcome and the loop continues regardless. A fixed politeness delay is
//! enforced after every identifier, success or failure.

use crate::config::{CrawlConfig, TitleId};
use crate::crawler::fetcher::{build_http_client, fetch_with_retry, RetryPolicy};
use crate::crawler::parser::parse_title_page;
use crate::record::Record;
use crate::HarvestError;
use reqwest::{Client, Method};

/// Terminal outcome of one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Record produced and appended
    Ok,
    /// Final non-success status after transport retries; identifier skipped
    HttpError(u16),
    /// Transport or other failure during fetch; identifier skipped
    Error(String),
}

/// Result of a full harvest run
#[derive(Debug)]
pub struct RunReport {
    /// One record per successfully processed identifier, in input order
    pub records: Vec<Record>,
    /// Terminal outcome per input identifier, in input order
    pub outcomes: Vec<(TitleId, Outcome)>,
}

impl RunReport {
    pub fn count(&self, outcome_matches: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| outcome_matches(o))
            .count()
    }
}

/// The harvester: HTTP client, retry policy, and crawl configuration
pub struct Harvester {
    client: Client,
    config: CrawlConfig,
    policy: RetryPolicy,
}

impl Harvester {
    /// Builds a harvester with its HTTP client
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(config.timeout)?;
        let policy = RetryPolicy {
            max_attempts: config.max_attempts,
            backoff_factor: config.backoff_factor,
        };
        Ok(Self {
            client,
            config,
            policy,
        })
    }

    /// Runs the harvest over a list of identifiers
    ///
    /// Never fails as a whole: per-identifier errors are logged and skipped,
    /// and the report reflects whatever accumulated. Processing is strictly
    /// sequential; one identifier is fully fetched and parsed before the
    /// next begins.
    pub async fn run(&self, ids: &[TitleId]) -> RunReport {
        let total = ids.len();
        let mut records = Vec::new();
        let mut outcomes = Vec::with_capacity(total);

        for (i, id) in ids.iter().enumerate() {
            let n = i + 1;
            let url = self.config.title_url(id);

            let outcome = match fetch_with_retry(&self.client, Method::GET, &url, &self.policy)
                .await
            {
                Ok(page) if page.is_success() => {
                    let parsed = parse_title_page(&page.body);
                    let record = Record::new(id.clone(), url, parsed);
                    tracing::info!(
                        "{}/{} [ok] {} -> {}",
                        n,
                        total,
                        id,
                        record.title.as_deref().unwrap_or("<no title>")
                    );
                    records.push(record);
                    Outcome::Ok
                }
                Ok(page) => {
                    tracing::warn!("{}/{} [warn] {} -> HTTP {}", n, total, id, page.status);
                    Outcome::HttpError(page.status)
                }
                Err(e) => {
                    tracing::error!("{}/{} [error] {}: {}", n, total, id, e);
                    Outcome::Error(e.to_string())
                }
            };
            outcomes.push((id.clone(), outcome));

            // Politeness delay, applied whatever the outcome
            tokio::time::sleep(self.config.delay).await;
        }

        RunReport { records, outcomes }
    }
}
