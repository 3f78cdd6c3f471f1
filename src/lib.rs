// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Infinity List
//!
//! Incremental pagination for lists that grow as they are scrolled.
//!
//! A [`PaginationController`] owns the items loaded so far and the index of
//! the next page. The presentation layer renders the items, asks
//! [`should_load_more`](PaginationController::should_load_more) for each one
//! it shows, and calls [`load_more`](PaginationController::load_more) once
//! the last item appears. The page itself comes from an injected
//! [`PageFetcher`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use infinity_list::{fetcher_fn, PaginationController};
//!
//! #[tokio::main]
//! async fn main() {
//!     let controller = PaginationController::builder(fetcher_fn(|page| async move {
//!         Ok::<_, std::io::Error>(vec![page * 2, page * 2 + 1])
//!     }))
//!     .on_error(|err| eprintln!("load failed: {err}"))
//!     .build();
//!
//!     let mut view = controller.subscribe();
//!     controller.load_more();
//!
//!     while view.changed().await {
//!         let items = view.items();
//!         if let Some(last) = items.last() {
//!             if controller.should_load_more(last) && items.len() < 10 {
//!                 controller.load_more();
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  Presentation (consumer)                     │
//! │  subscribe() → ItemsView   should_load_more(item)  load_more │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                   PaginationController                       │
//! │  items (append-only)   page_index   overlap guard  callbacks │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ fetch(page_index)
//! ┌──────────────┬───────────────┴──────────┬────────────────────┐
//! │  FnFetcher   │   HttpPageFetcher        │   PendingFetcher   │
//! └──────────────┴──────────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Pages and fetch outcomes
pub mod page;

/// Page sources
pub mod fetcher;

/// The pagination controller
pub mod controller;

/// Feed configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use controller::{
    ControllerBuilder, ControllerConfig, ControllerState, ItemsView, LoadStatus, OverlapPolicy,
    PaginationController,
};
pub use error::{Error, Result};
pub use fetcher::{fetcher_fn, FnFetcher, HttpPageFetcher, JsonPage, PageFetcher, PendingFetcher};
pub use page::{FetchOutcome, ItemPage, Page};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
