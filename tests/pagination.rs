//! Integration tests for the public pagination API
//!
//! Drives a controller the way a list view would: render, check the last
//! item, load more, re-render on change.

use infinity_list::config::{load_feed_config_from_str, SourceConfig};
use infinity_list::{
    fetcher_fn, FetchOutcome, HttpPageFetcher, ItemPage, JsonPage, LoadStatus, OverlapPolicy,
    PageFetcher, PaginationController,
};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Article {
    id: u32,
    title: String,
}

#[derive(Debug, Clone, PartialEq)]
enum FeedError {
    Network,
}

// ============================================================================
// In-process Feed
// ============================================================================

#[tokio::test]
async fn test_view_driven_scrolling() {
    let controller = PaginationController::new(fetcher_fn(|page| async move {
        if page < 3 {
            Ok::<_, FeedError>(ItemPage::with_meta(
                (page * 3..page * 3 + 3).collect::<Vec<u32>>(),
                page < 2,
            ))
        } else {
            Ok(ItemPage::with_meta(Vec::new(), false))
        }
    }));
    let mut view = controller.subscribe();

    // List appears
    controller.load_more();

    let mut renders = 0;
    let mut rendered = 0;
    while view.changed().await {
        renders += 1;
        let items = view.items();

        // An empty page leaves the list as it was
        if items.len() == rendered {
            break;
        }
        rendered = items.len();

        if items.iter().any(|item| controller.should_load_more(item)) {
            controller.load_more();
        } else {
            break;
        }
    }

    assert_eq!(controller.items(), (0..9).collect::<Vec<u32>>());
    assert_eq!(controller.page_index(), 4);
    assert_eq!(renders, 4);
}

#[tokio::test]
async fn test_error_then_recovery() {
    let attempts = Arc::new(Mutex::new(0u32));
    let attempts_in_fetch = Arc::clone(&attempts);
    let errors = Arc::new(Mutex::new(Vec::new()));
    let errors_in_callback = Arc::clone(&errors);

    let controller = PaginationController::builder(fetcher_fn(move |page| {
        let attempts = Arc::clone(&attempts_in_fetch);
        async move {
            let mut attempts = attempts.lock().unwrap();
            *attempts += 1;
            if *attempts == 1 {
                Err(FeedError::Network)
            } else {
                Ok(vec![format!("item-{page}")])
            }
        }
    }))
    .on_error(move |err| errors_in_callback.lock().unwrap().push(err))
    .build();

    assert_eq!(
        controller.load_more().await.unwrap(),
        LoadStatus::Failed { page_index: 0 }
    );
    assert_eq!(*errors.lock().unwrap(), vec![FeedError::Network]);
    assert_eq!(controller.page_index(), 0);

    assert!(controller.load_more().await.unwrap().is_loaded());
    assert_eq!(controller.items(), vec!["item-0".to_string()]);
    assert_eq!(*attempts.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_fetcher_called_directly() {
    let fetcher = fetcher_fn(|page| async move { Ok::<_, FeedError>(vec![page]) });
    assert_eq!(fetcher.fetch(9).await, FetchOutcome::Success(vec![9]));
}

// ============================================================================
// HTTP Feed
// ============================================================================

#[tokio::test]
async fn test_http_feed_from_yaml() {
    let server = MockServer::start().await;

    for (page, ids) in [("1", vec![1, 2]), ("2", vec![3])] {
        let data: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "title": format!("Article {id}")}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/articles"))
            .and(query_param("page", page))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": data, "has_more": page == "1"})),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let yaml = format!(
        "source:\n  url: {}/articles\n  items_path: $.data\ncontroller:\n  initial_page: 1\n",
        server.uri()
    );
    let feed = load_feed_config_from_str(&yaml).unwrap();

    let pages_seen = Arc::new(Mutex::new(Vec::new()));
    let pages_in_callback = Arc::clone(&pages_seen);

    let controller = PaginationController::builder(HttpPageFetcher::<Article>::new(feed.source).unwrap())
        .config(feed.controller)
        .on_success(move |page: JsonPage<Article>| {
            pages_in_callback
                .lock()
                .unwrap()
                .push((page.page_index, page.body["has_more"].as_bool()));
        })
        .build();

    controller.load_more().await.unwrap();
    let last = controller.items().last().cloned().unwrap();
    assert!(controller.should_load_more(&last));
    controller.load_more().await.unwrap();

    let titles: Vec<String> = controller.items().into_iter().map(|a| a.title).collect();
    assert_eq!(titles, vec!["Article 1", "Article 2", "Article 3"]);
    assert_eq!(controller.page_index(), 3);
    assert_eq!(
        *pages_seen.lock().unwrap(),
        vec![(1, Some(true)), (2, Some(false))]
    );
}

#[tokio::test]
async fn test_http_overlap_skip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([1, 2]))
                .set_delay(std::time::Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = PaginationController::builder(
        HttpPageFetcher::<u32>::new(SourceConfig::new(format!("{}/slow", server.uri()))).unwrap(),
    )
    .overlap(OverlapPolicy::Skip)
    .build();

    let first = controller.load_more();
    while !controller.is_loading() {
        tokio::task::yield_now().await;
    }
    let second = controller.load_more();

    assert_eq!(second.await.unwrap(), LoadStatus::Skipped);
    assert!(first.await.unwrap().is_loaded());
    assert_eq!(controller.items(), vec![1, 2]);
}
