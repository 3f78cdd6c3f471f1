//! Tests for CLI module

use super::*;
use crate::config::{FeedConfig, SourceConfig};
use crate::controller::OverlapPolicy;
use crate::error::Error;
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn runner() -> Runner {
    Runner::new(Cli::parse_from(["infinity-list", "validate", "-C", "feed.yaml"]))
}

fn source_at(server: &MockServer) -> SourceConfig {
    SourceConfig::new(format!("{}/feed", server.uri()))
}

async fn mount_page(server: &MockServer, page: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// Argument Parsing Tests
// ============================================================================

#[test]
fn test_parse_scroll_args() {
    let cli = Cli::parse_from([
        "infinity-list",
        "--format",
        "pretty",
        "scroll",
        "--url",
        "http://localhost/feed",
        "--items-path",
        "$.data",
        "--start-page",
        "1",
        "--max-pages",
        "3",
    ]);

    assert_eq!(cli.format, OutputFormat::Pretty);
    match cli.command {
        Commands::Scroll {
            url,
            items_path,
            start_page,
            max_pages,
            config,
            page_param,
        } => {
            assert_eq!(url.as_deref(), Some("http://localhost/feed"));
            assert_eq!(items_path.as_deref(), Some("$.data"));
            assert_eq!(start_page, Some(1));
            assert_eq!(max_pages, Some(3));
            assert!(config.is_none());
            assert!(page_param.is_none());
        }
        other => panic!("Expected Scroll, got {other:?}"),
    }
}

#[test]
fn test_parse_validate_args() {
    let cli = Cli::parse_from(["infinity-list", "-v", "validate", "--config", "feed.yaml"]);
    assert!(cli.verbose);
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(matches!(cli.command, Commands::Validate { .. }));
}

// ============================================================================
// Feed Resolution Tests
// ============================================================================

#[test]
fn test_resolve_feed_from_url() {
    let feed = Runner::resolve_feed(&ScrollOptions {
        url: Some("http://localhost/feed".to_string()),
        page_param: Some("p".to_string()),
        start_page: Some(2),
        ..ScrollOptions::default()
    })
    .unwrap();

    assert_eq!(feed.source.url, "http://localhost/feed");
    assert_eq!(feed.source.page_param, "p");
    assert_eq!(feed.source.items_path, "$");
    assert_eq!(feed.controller.initial_page, 2);
}

#[test]
fn test_resolve_feed_flags_override_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        b"source:\n  url: http://from-file/feed\n  items_path: $.data\ncontroller:\n  initial_page: 4\n  overlap: allow\n",
    )
    .unwrap();

    let feed = Runner::resolve_feed(&ScrollOptions {
        config: Some(file.path().to_path_buf()),
        url: Some("http://override/feed".to_string()),
        ..ScrollOptions::default()
    })
    .unwrap();

    assert_eq!(feed.source.url, "http://override/feed");
    assert_eq!(feed.source.items_path, "$.data");
    assert_eq!(feed.controller.initial_page, 4);
    assert_eq!(feed.controller.overlap, OverlapPolicy::Allow);
}

#[test]
fn test_resolve_feed_requires_source() {
    let err = Runner::resolve_feed(&ScrollOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Scroll Tests
// ============================================================================

#[tokio::test]
async fn test_scroll_until_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, "0", json!({"data": [1, 2, 3]})).await;
    mount_page(&server, "1", json!({"data": [4, 5]})).await;
    mount_page(&server, "2", json!({"data": []})).await;

    let feed = FeedConfig::new(source_at(&server).with_items_path("$.data"));
    let summary = runner().scroll(feed, None).await.unwrap();

    assert_eq!(
        summary,
        ScrollSummary {
            start_page: 0,
            pages: 3,
            items: 5,
            next_page: 3,
            reached_end: true,
        }
    );
}

#[tokio::test]
async fn test_scroll_stops_at_max_pages() {
    let server = MockServer::start().await;
    mount_page(&server, "1", json!(["a", "b"])).await;
    mount_page(&server, "2", json!(["c"])).await;

    let mut feed = FeedConfig::new(source_at(&server));
    feed.controller.initial_page = 1;

    let summary = runner().scroll(feed, Some(2)).await.unwrap();

    assert_eq!(summary.start_page, 1);
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.items, 3);
    assert_eq!(summary.next_page, 3);
    assert!(!summary.reached_end);
}

#[tokio::test]
async fn test_scroll_reports_fetch_error() {
    let server = MockServer::start().await;
    mount_page(&server, "0", json!([1])).await;

    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let feed = FeedConfig::new(source_at(&server));
    let err = runner().scroll(feed, None).await.unwrap_err();

    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_scroll_zero_max_pages_fetches_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1])))
        .expect(0)
        .mount(&server)
        .await;

    let mut feed = FeedConfig::new(source_at(&server));
    feed.controller.initial_page = 5;

    let summary = runner().scroll(feed, Some(0)).await.unwrap();

    assert_eq!(
        summary,
        ScrollSummary {
            start_page: 5,
            pages: 0,
            items: 0,
            next_page: 5,
            reached_end: false,
        }
    );
}

#[tokio::test]
async fn test_scroll_from_max_page_index_ends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1])))
        .expect(0)
        .mount(&server)
        .await;

    let mut feed = FeedConfig::new(source_at(&server));
    feed.controller.initial_page = u32::MAX;

    let summary = runner().scroll(feed, None).await.unwrap();

    assert_eq!(summary.pages, 0);
    assert_eq!(summary.next_page, u32::MAX);
    assert!(summary.reached_end);
}
