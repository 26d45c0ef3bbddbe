//! HTTP fetcher behavior against a mock server

use doc_harvester::config::FetcherConfig;
use doc_harvester::crawler::{FetchError, HttpFetcher, PageFetcher};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn polling_config(settle_timeout: u64) -> FetcherConfig {
    FetcherConfig {
        settle_timeout,
        poll_interval: 20,
        ready_selector: Some("main, article".to_string()),
        ..FetcherConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "docs-bot/2.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<main>hello</main>"))
        .mount(&server)
        .await;

    let config = FetcherConfig {
        user_agent: "docs-bot/2.0".to_string(),
        ..FetcherConfig::default()
    };
    let fetcher = HttpFetcher::new(&config).unwrap();

    let markup = fetcher.fetch(&server.uri()).await.unwrap();
    assert!(markup.contains("hello"));
}

#[tokio::test]
async fn test_default_config_requests_each_page_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><h1>Landing</h1><p>x</p></body>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
    let started = Instant::now();
    let markup = fetcher
        .fetch(&format!("{}/landing", server.uri()))
        .await
        .unwrap();

    assert!(markup.contains("Landing"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_failed_poll_keeps_fetched_markup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><p>partial</p></body>"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&polling_config(2_000)).unwrap();
    let markup = fetcher
        .fetch(&format!("{}/flaky", server.uri()))
        .await
        .unwrap();

    assert!(markup.contains("partial"));
}

#[tokio::test]
async fn test_readiness_poll_waits_for_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><p>loading</p></body>"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><main>rendered</main></body>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&polling_config(2_000)).unwrap();
    let markup = fetcher.fetch(&format!("{}/app", server.uri())).await.unwrap();

    assert!(markup.contains("rendered"));
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_readiness_poll_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<body><p>no container</p></body>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&polling_config(200)).unwrap();
    let started = Instant::now();
    let markup = fetcher
        .fetch(&format!("{}/plain", server.uri()))
        .await
        .unwrap();

    assert!(markup.contains("no container"));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
    let result = fetcher.fetch(&format!("{}/down", server.uri())).await;

    assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_empty_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blank"))
        .respond_with(ResponseTemplate::new(200).set_body_string("   "))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();
    let result = fetcher.fetch(&format!("{}/blank", server.uri())).await;

    assert!(matches!(result, Err(FetchError::EmptyPage { .. })));
}
