//! Page types
//!
//! Defines the page abstraction shared by fetchers and the controller.

use serde::{Deserialize, Serialize};

/// A batch of items returned by one fetch
///
/// The controller only reads `items`; everything else a page carries
/// (cursors, totals, the raw response) is forwarded untouched to the
/// success callback.
pub trait Page: Send + 'static {
    /// Element type shown by the consumer
    type Item;

    /// Items of this page, in display order
    fn items(&self) -> &[Self::Item];

    /// Number of items on this page
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether the page carried no items
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl<E: Send + 'static> Page for Vec<E> {
    type Item = E;

    fn items(&self) -> &[E] {
        self
    }
}

/// Page of items with arbitrary metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPage<E, M = ()> {
    /// Items in display order
    pub items: Vec<E>,
    /// Fetch-specific metadata, never interpreted by the controller
    pub meta: M,
}

impl<E> ItemPage<E> {
    /// Create a page without metadata
    pub fn new(items: Vec<E>) -> Self {
        Self { items, meta: () }
    }
}

impl<E, M> ItemPage<E, M> {
    /// Create a page carrying metadata
    pub fn with_meta(items: Vec<E>, meta: M) -> Self {
        Self { items, meta }
    }
}

impl<E, M> Page for ItemPage<E, M>
where
    E: Send + 'static,
    M: Send + 'static,
{
    type Item = E;

    fn items(&self) -> &[E] {
        &self.items
    }
}

impl<E> From<Vec<E>> for ItemPage<E> {
    fn from(items: Vec<E>) -> Self {
        Self::new(items)
    }
}

/// Result of a single fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<P, E> {
    /// The fetch produced a page
    Success(P),
    /// The fetch failed
    Failure(E),
}

impl<P, E> FetchOutcome<P, E> {
    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if this is a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Get the page, if any
    pub fn page(&self) -> Option<&P> {
        match self {
            Self::Success(page) => Some(page),
            Self::Failure(_) => None,
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<P, E> {
        match self {
            Self::Success(page) => Ok(page),
            Self::Failure(err) => Err(err),
        }
    }
}

impl<P, E> From<Result<P, E>> for FetchOutcome<P, E> {
    fn from(result: Result<P, E>) -> Self {
        match result {
            Ok(page) => Self::Success(page),
            Err(err) => Self::Failure(err),
        }
    }
}

impl<P, E> From<FetchOutcome<P, E>> for Result<P, E> {
    fn from(outcome: FetchOutcome<P, E>) -> Self {
        outcome.into_result()
    }
}
