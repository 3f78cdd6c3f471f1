//! Fetcher trait and in-process implementations

use crate::page::{FetchOutcome, Page};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

/// Element type produced by a fetcher's pages
pub type ItemOf<F> = <<F as PageFetcher>::Page as Page>::Item;

/// Core trait for page sources
#[async_trait]
pub trait PageFetcher: Send + Sync + 'static {
    /// Page type returned on success
    type Page: Page;

    /// Error type returned on failure, never interpreted by the controller
    type Error: Send + 'static;

    /// Fetch the page at `page_index`
    async fn fetch(&self, page_index: u32) -> FetchOutcome<Self::Page, Self::Error>;
}

// ============================================================================
// Closure Fetcher
// ============================================================================

/// Fetcher backed by an async closure
///
/// The closure receives the page index and returns a `Result`; `Ok` becomes
/// a success and `Err` a failure.
pub struct FnFetcher<Fun> {
    fetch: Fun,
}

impl<Fun> FnFetcher<Fun> {
    /// Wrap a closure
    pub fn new(fetch: Fun) -> Self {
        Self { fetch }
    }
}

impl<Fun> fmt::Debug for FnFetcher<Fun> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFetcher").finish_non_exhaustive()
    }
}

/// Build a fetcher from an async closure
///
/// ```rust,ignore
/// let fetcher = fetcher_fn(|page| async move {
///     Ok::<_, std::io::Error>(vec![page * 10, page * 10 + 1])
/// });
/// ```
pub fn fetcher_fn<Fun, Fut, P, E>(fetch: Fun) -> FnFetcher<Fun>
where
    Fun: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P, E>> + Send + 'static,
    P: Page,
    E: Send + 'static,
{
    FnFetcher::new(fetch)
}

#[async_trait]
impl<Fun, Fut, P, E> PageFetcher for FnFetcher<Fun>
where
    Fun: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<P, E>> + Send + 'static,
    P: Page,
    E: Send + 'static,
{
    type Page = P;
    type Error = E;

    async fn fetch(&self, page_index: u32) -> FetchOutcome<P, E> {
        (self.fetch)(page_index).await.into()
    }
}

// ============================================================================
// Pending Fetcher
// ============================================================================

/// Fetcher that never completes
///
/// Stands in where no real source was supplied: loads stay pending forever,
/// nothing is appended and no callback fires.
pub struct PendingFetcher<P, E> {
    _marker: PhantomData<fn() -> (P, E)>,
}

impl<P, E> PendingFetcher<P, E> {
    /// Create a pending fetcher
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, E> Default for PendingFetcher<P, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, E> fmt::Debug for PendingFetcher<P, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PendingFetcher")
    }
}

#[async_trait]
impl<P, E> PageFetcher for PendingFetcher<P, E>
where
    P: Page,
    E: Send + 'static,
{
    type Page = P;
    type Error = E;

    async fn fetch(&self, _page_index: u32) -> FetchOutcome<P, E> {
        futures::future::pending().await
    }
}
