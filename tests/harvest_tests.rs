//! Integration tests for the harvester
//!
//! These use wiremock to stand in for the catalog site and exercise the
//! full fetch-retry-parse-accumulate cycle end-to-end.

use std::time::Duration;
use title_harvest::config::{CrawlConfig, TitleId};
use title_harvest::crawler::{fetch_with_retry, RetryPolicy};
use title_harvest::output::summarize;
use title_harvest::{Harvester, Outcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config pointed at a mock server, tuned for fast tests
fn test_config(base_url: &str) -> CrawlConfig {
    CrawlConfig {
        base_url: format!("{}/title", base_url),
        delay: Duration::from_millis(5),
        timeout: Duration::from_secs(5),
        max_attempts: 3,
        backoff_factor: Duration::from_millis(5),
    }
}

fn title_page_body() -> &'static str {
    r#"<html><head>
    <script type="application/ld+json">{
        "name": "The Shawshank Redemption",
        "datePublished": "1994-09-23",
        "aggregateRating": {"ratingValue": 9.3, "ratingCount": 2800000},
        "genre": ["Drama"],
        "duration": "PT142M",
        "director": [{"name": "Frank Darabont"}]
    }</script>
    </head><body></body></html>"#
}

fn ids(raw: &[&str]) -> Vec<TitleId> {
    raw.iter().map(|r| TitleId::new(r).unwrap()).collect()
}

#[tokio::test]
async fn test_successful_harvest_produces_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let report = harvester.run(&ids(&["tt0111161"])).await;

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.title.as_deref(), Some("The Shawshank Redemption"));
    assert_eq!(record.year, Some(1994));
    assert_eq!(record.rating, Some(9.3));
    assert_eq!(record.votes, Some(2800000));
    assert_eq!(record.genres, Some(vec!["Drama".to_string()]));
    assert_eq!(record.runtime_min, Some(142));
    assert_eq!(record.directors, Some(vec!["Frank Darabont".to_string()]));
    assert_eq!(record.url, format!("{}/title/tt0111161/", server.uri()));
    assert_eq!(report.outcomes[0].1, Outcome::Ok);
}

#[tokio::test]
async fn test_records_follow_input_order() {
    let server = MockServer::start().await;

    for id in ["tt0000001", "tt0000002", "tt0000003"] {
        Mock::given(method("GET"))
            .and(path(format!("/title/{}/", id)))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<html><head><script type="application/ld+json">{{"name": "{}"}}</script></head></html>"#,
                id
            )))
            .mount(&server)
            .await;
    }

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let input = ids(&["tt0000002", "tt0000001", "tt0000003"]);
    let report = harvester.run(&input).await;

    assert_eq!(report.records.len(), 3);
    let titles: Vec<_> = report
        .records
        .iter()
        .map(|r| r.title.clone().unwrap())
        .collect();
    assert_eq!(titles, vec!["tt0000002", "tt0000001", "tt0000003"]);
}

#[tokio::test]
async fn test_http_error_skips_identifier_but_run_continues() {
    let server = MockServer::start().await;

    // 404 is not in the retry set: exactly one request expected
    Mock::given(method("GET"))
        .and(path("/title/tt0000404/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let report = harvester.run(&ids(&["tt0000404", "tt0111161"])).await;

    // Failed identifier is skipped, not represented by a placeholder row
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].title_id.as_str(), "tt0111161");
    assert_eq!(report.outcomes[0].1, Outcome::HttpError(404));
    assert_eq!(report.outcomes[1].1, Outcome::Ok);
}

#[tokio::test]
async fn test_persistent_503_exhausts_retries() {
    let server = MockServer::start().await;

    // Three attempts total, then the last 503 is surfaced as the outcome
    Mock::given(method("GET"))
        .and(path("/title/tt0000503/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let report = harvester.run(&ids(&["tt0000503", "tt0111161"])).await;

    assert_eq!(report.outcomes[0].1, Outcome::HttpError(503));
    // Other identifiers unaffected; final table excludes the failed one
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].title_id.as_str(), "tt0111161");
}

#[tokio::test]
async fn test_transient_503_recovers_on_retry() {
    let server = MockServer::start().await;

    // First two attempts fail, third succeeds
    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let report = harvester.run(&ids(&["tt0111161"])).await;

    assert_eq!(report.outcomes[0].1, Outcome::Ok);
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].rating, Some(9.3));
}

#[tokio::test]
async fn test_connection_failure_is_error_outcome() {
    // Nothing listens on port 1; the connection never completes
    let config = CrawlConfig {
        base_url: "http://127.0.0.1:1/title".to_string(),
        delay: Duration::from_millis(5),
        timeout: Duration::from_secs(2),
        max_attempts: 2,
        backoff_factor: Duration::from_millis(5),
    };

    let harvester = Harvester::new(config).unwrap();
    let report = harvester.run(&ids(&["tt0000001"])).await;

    assert!(report.records.is_empty());
    assert!(matches!(report.outcomes[0].1, Outcome::Error(_)));
}

#[tokio::test]
async fn test_fetch_returns_non_retryable_status_as_is() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .expect(1)
        .mount(&server)
        .await;

    let client = title_harvest::crawler::build_http_client(Duration::from_secs(5)).unwrap();
    let page = fetch_with_retry(
        &client,
        reqwest::Method::GET,
        &format!("{}/gone", server.uri()),
        &RetryPolicy {
            max_attempts: 3,
            backoff_factor: Duration::from_millis(5),
        },
    )
    .await
    .unwrap();

    assert_eq!(page.status, 410);
}

#[tokio::test]
async fn test_every_identifier_reaches_one_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/tt0000001/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/title/tt0000002/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let input = ids(&["tt0000001", "tt0000002", "tt0000001"]);
    let report = harvester.run(&input).await;

    assert_eq!(report.outcomes.len(), input.len());
    // Row count never exceeds input count; equality only without failures
    assert!(report.records.len() <= input.len());
    assert_eq!(report.records.len(), 2);
}

#[tokio::test]
async fn test_summary_over_harvested_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/title/tt0111161/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page_body()))
        .mount(&server)
        .await;

    let harvester = Harvester::new(test_config(&server.uri())).unwrap();
    let report = harvester.run(&ids(&["tt0111161"])).await;

    let summary = summarize(&report.records);
    assert_eq!(summary.n_titles, 1);
    assert_eq!(summary.rating_mean, Some(9.3));
    assert_eq!(summary.rating_median, Some(9.3));
    assert_eq!(summary.top_genres, vec![("Drama".to_string(), 1)]);
    assert_eq!(summary.n_with_directors, 1);
}
