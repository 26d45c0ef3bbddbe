//! End-to-end harvests against a mock documentation server

use doc_harvester::output::load_section_record;
use doc_harvester::{Config, Harvester};
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration on top of the default fetcher settings
fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    let mut config = Config::new(base_url, output_dir.to_str().unwrap());
    config.harvester.workers = 2;
    config.fetcher.request_timeout = 5_000;
    config
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_harvest_writes_section_files() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body>
            <h1>Home</h1>
            <main><p>hi</p><script>track()</script><a href="/guide">G</a></main>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/guide",
        r#"<html><body>
            <nav>Tutorials Guide</nav>
            <h1>Guide</h1>
            <main><pre>x = 1</pre></main>
        </body></html>"#,
    )
    .await;

    let config = create_test_config(&server.uri(), output.path());
    let report = Harvester::new(config)
        .unwrap()
        .harvest(None)
        .await
        .expect("Harvest should succeed");

    assert_eq!(report.visited, 2);
    assert_eq!(report.saved, 2);
    assert_eq!(report.failed, 0);

    let home = load_section_record(&output.path().join("home.json")).unwrap();
    assert_eq!(home.title, "Home");
    assert_eq!(home.category, "general");
    assert!(home.code_examples.is_empty());
    assert_eq!(home.url, format!("{}/", server.uri()));

    let home_html = std::fs::read_to_string(output.path().join("home.html")).unwrap();
    assert!(home_html.contains("<p>hi</p>"));
    assert!(!home_html.contains("track()"));

    let guide = load_section_record(&output.path().join("guide.json")).unwrap();
    assert_eq!(guide.title, "Guide");
    assert_eq!(guide.category, "Tutorials");
    assert_eq!(guide.code_examples, vec!["x = 1"]);
    assert_eq!(guide.url, format!("{}/guide", server.uri()));
    assert!(output.path().join("guide.html").exists());
}

#[tokio::test]
async fn test_skip_patterns_and_foreign_hosts_are_not_requested() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Home</h1><main>
            <a href="/search?q=loop">Search</a>
            <a href="/account/login">Login</a>
            <a href="https://other.org/docs">Elsewhere</a>
            <a href="/guide">Guide</a>
        </main></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/guide",
        "<html><body><h1>Guide</h1><main><p>ok</p></main></body></html>",
    )
    .await;

    let config = create_test_config(&server.uri(), output.path());
    Harvester::new(config).unwrap().harvest(None).await.unwrap();

    let paths = requested_paths(&server).await;
    assert!(paths.contains(&"/guide".to_string()));
    assert!(!paths.iter().any(|p| p.contains("search")));
    assert!(!paths.iter().any(|p| p.contains("login")));
    assert_eq!(paths.len(), 2);
}

#[tokio::test]
async fn test_failing_pages_do_not_abort_the_harvest() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Home</h1><main>
            <a href="/broken">Broken</a>
            <a href="/empty">Empty</a>
            <a href="/missing">Missing</a>
            <a href="/ok">Ok</a>
        </main></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/empty", "").await;
    mount_page(
        &server,
        "/ok",
        "<html><body><h1>Ok</h1><article><p>fine</p></article></body></html>",
    )
    .await;

    let config = create_test_config(&server.uri(), output.path());
    let report = Harvester::new(config).unwrap().harvest(None).await.unwrap();

    assert_eq!(report.visited, 5);
    assert_eq!(report.saved, 2);
    assert_eq!(report.failed, 3);
    assert!(output.path().join("ok.json").exists());
}

#[tokio::test]
async fn test_pages_without_content_are_skipped() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Landing</h1><p>Welcome</p><a href="/guide">Guide</a></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/guide",
        r#"<html><body><h1>Guide</h1><div class="documentation">text</div></body></html>"#,
    )
    .await;

    let config = create_test_config(&server.uri(), output.path());
    let report = Harvester::new(config).unwrap().harvest(None).await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.saved, 1);
    assert!(!output.path().join("landing.json").exists());
    assert!(output.path().join("guide.json").exists());
}

#[tokio::test]
async fn test_max_depth_limits_the_crawl() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Home</h1><main><a href="/one">1</a></main></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/one",
        r#"<html><body><h1>One</h1><main><a href="/two">2</a></main></body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/two",
        "<html><body><h1>Two</h1><main>deep</main></body></html>",
    )
    .await;

    let mut config = create_test_config(&server.uri(), output.path());
    config.harvester.max_depth = Some(1);
    let report = Harvester::new(config).unwrap().harvest(None).await.unwrap();

    assert_eq!(report.visited, 2);
    assert!(!requested_paths(&server).await.contains(&"/two".to_string()));
}

#[tokio::test]
async fn test_w3schools_parser_is_selected_by_site() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/python/python_for_loops.asp",
        r#"<html><head><title>Python For Loops - W3Schools</title></head><body>
            <nav class="w3-sidenav"><a class="active" href="/python/python_for_loops.asp">Python For Loops</a></nav>
            <div id="main">
                <h1>Python For Loops</h1>
                <div class="w3-example"><h3>Example</h3><div class="w3-code notranslate">for x in "banana":</div></div>
            </div>
        </body></html>"#,
    )
    .await;

    let mut config = create_test_config(&server.uri(), output.path());
    config.parser.site = "w3schools".to_string();
    config.harvester.start_url = Some(format!("{}/python/python_for_loops.asp", server.uri()));
    let report = Harvester::new(config).unwrap().harvest(None).await.unwrap();

    assert_eq!(report.saved, 1);
    assert_eq!(requested_paths(&server).await.len(), 1);
    let record = load_section_record(&output.path().join("python-for-loops.json")).unwrap();
    assert_eq!(record.category, "Python For Loops");
    assert!(!record.code_examples.is_empty());
}

#[tokio::test]
async fn test_each_page_is_requested_once() {
    let server = MockServer::start().await;
    let output = TempDir::new().unwrap();

    mount_page(
        &server,
        "/",
        r#"<html><body><h1>Landing</h1><p>x</p>
            <a href="/">Home</a><a href="/guide">Guide</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &server,
        "/guide",
        r#"<html><body><h1>Guide</h1><main><a href="/">Back</a></main></body></html>"#,
    )
    .await;

    let config = create_test_config(&server.uri(), output.path());
    let report = Harvester::new(config).unwrap().harvest(None).await.unwrap();

    assert_eq!(report.visited, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.saved, 1);

    let mut paths = requested_paths(&server).await;
    paths.sort();
    assert_eq!(paths, vec!["/".to_string(), "/guide".to_string()]);
}
