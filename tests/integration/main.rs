//! Integration tests for Doc-Harvester
//!
//! These tests use wiremock to serve a small documentation site over HTTP and
//! run full harvests against it.

mod config_tests;
mod fetcher_tests;
mod harvest_tests;
