//! Page module
//!
//! A page is one batch of items produced by a single fetch, plus whatever
//! fetch-specific metadata the source returned alongside it.
//!
//! # Overview
//!
//! The page module provides:
//! - `Page` - Trait exposing the items of a fetched page
//! - `ItemPage` - Generic page carrying items and opaque metadata
//! - `FetchOutcome` - Result of a single fetch attempt

mod types;

pub use types::{FetchOutcome, ItemPage, Page};
