//! Controller module
//!
//! The pagination controller and the pieces consumers interact with.
//!
//! # Overview
//!
//! The controller module provides:
//! - `PaginationController` - Owns loaded items and page progress
//! - `ControllerBuilder` - Initial page, overlap policy and callbacks
//! - `ItemsView` - Read-only, change-notifying view for consumers
//! - `LoadStatus` - How a single load resolved

mod paginator;
mod types;
mod view;

pub use paginator::{ControllerBuilder, PaginationController};
pub use types::{ControllerConfig, ControllerState, LoadStatus, OverlapPolicy};
pub use view::ItemsView;
