//! Configuration files driving a harvester

use doc_harvester::config::load_config;
use doc_harvester::{Harvester, HarvestError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_minimal_config_gets_defaults() {
    let file = write_config(
        r#"
[harvester]
base-url = "https://docs.example.com"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.harvester.workers, 4);
    assert_eq!(config.harvester.skip_patterns, vec!["search", "login"]);
    assert_eq!(config.output.directory, "output");
    assert_eq!(config.parser.site, "default");
    assert!(config.fetcher.ready_selector.is_none());

    let harvester = Harvester::new(config).unwrap();
    assert_eq!(harvester.scope().base_host(), "docs.example.com");
}

#[test]
fn test_full_config() {
    let file = write_config(
        r#"
[harvester]
base-url = "https://www.w3schools.com"
start-url = "https://www.w3schools.com/python/"
workers = 8
max-depth = 3
max-pages = 500
skip-patterns = ["search", "login", "exercise"]

[fetcher]
user-agent = "docs-bot/2.0"
request-timeout = 10000
settle-timeout = 1500
poll-interval = 100
ready-selector = "div#main"

[output]
directory = "w3schools"

[parser]
site = "w3schools"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.harvester.max_depth, Some(3));
    assert_eq!(config.harvester.max_pages, Some(500));
    assert_eq!(config.fetcher.settle_timeout, 1500);
    assert_eq!(config.parser.site, "w3schools");

    let harvester = Harvester::new(config).unwrap();
    assert!(harvester.scope().is_skipped("https://www.w3schools.com/python/exercise.asp"));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let file = write_config(
        r#"
[harvester]
base-url = "ftp://docs.example.com"
"#,
    );

    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_harvester_validates_programmatic_config() {
    let mut config = doc_harvester::Config::new("https://docs.example.com", "out");
    config.harvester.workers = 0;

    assert!(matches!(Harvester::new(config), Err(HarvestError::Config(_))));
}
