//! Page fetcher module
//!
//! Supports: closure-backed fetchers, the never-resolving default, and
//! JSON pages over HTTP.
//!
//! # Overview
//!
//! A fetcher is the injected dependency that turns a page index into a
//! page. The controller hands it the index explicitly on every call and
//! does not care where the page comes from.

mod http;
mod types;

pub use http::{extract_items, HttpPageFetcher, JsonPage};
pub use types::{fetcher_fn, FnFetcher, ItemOf, PageFetcher, PendingFetcher};
