//! Controller types
//!
//! State, configuration and load results for the pagination controller.

use serde::{Deserialize, Serialize};

/// Accumulated items and page progress
///
/// Items are append-only and kept in display order. `page_index` is the
/// index the next fetch will be asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState<E> {
    /// Items loaded so far
    pub items: Vec<E>,
    /// Index of the next page to fetch
    pub page_index: u32,
}

impl<E> ControllerState<E> {
    /// Create an empty state starting at `initial_page`
    pub fn new(initial_page: u32) -> Self {
        Self {
            items: Vec::new(),
            page_index: initial_page,
        }
    }

    /// Number of items loaded
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last loaded item
    pub fn last(&self) -> Option<&E> {
        self.items.last()
    }
}

impl<E: PartialEq> ControllerState<E> {
    /// Whether `candidate` equals the last loaded item
    pub fn is_last(&self, candidate: &E) -> bool {
        self.items.last().is_some_and(|last| last == candidate)
    }
}

impl<E: Clone> ControllerState<E> {
    /// Append a page and advance to the next index
    ///
    /// Leaves the state untouched and returns false when the index cannot
    /// advance past `u32::MAX`.
    pub(crate) fn append_page(&mut self, items: &[E]) -> bool {
        let Some(next) = self.page_index.checked_add(1) else {
            return false;
        };
        self.items.extend_from_slice(items);
        self.page_index = next;
        true
    }
}

/// What `load_more` does while another fetch is still pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Ignore the call
    #[default]
    Skip,
    /// Start another fetch anyway; both results are appended
    Allow,
}

/// Configuration for a controller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Index of the first page to request
    #[serde(default)]
    pub initial_page: u32,

    /// Overlapping load behavior
    #[serde(default)]
    pub overlap: OverlapPolicy,
}

impl ControllerConfig {
    /// Create a default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first page index
    #[must_use]
    pub fn with_initial_page(mut self, initial_page: u32) -> Self {
        self.initial_page = initial_page;
        self
    }

    /// Set the overlap policy
    #[must_use]
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

/// How a single load resolved
///
/// Errors are not carried here; they only go to the error callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// A page was appended
    Loaded {
        /// Index the page was fetched with
        page_index: u32,
        /// Number of items appended
        count: usize,
    },
    /// The fetch failed and nothing changed
    Failed {
        /// Index the fetch was attempted with
        page_index: u32,
    },
    /// Another fetch was pending and the overlap policy is `Skip`
    Skipped,
    /// The page index cannot advance any further; nothing was fetched or
    /// appended and no callback ran
    Exhausted {
        /// Index the load stopped at
        page_index: u32,
    },
}

impl LoadStatus {
    /// Check if a page was appended
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    /// Check if the fetch failed
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Check if the call was skipped
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    /// Check if the page index ran out
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Items appended by this load (zero unless loaded)
    pub fn appended(&self) -> usize {
        match self {
            Self::Loaded { count, .. } => *count,
            _ => 0,
        }
    }
}
