//! Pagination controller implementation
//!
//! Owns the accumulated items and page index, asks the fetcher for the next
//! page and publishes every change to subscribers in one step.

use super::types::{ControllerConfig, ControllerState, LoadStatus, OverlapPolicy};
use super::view::ItemsView;
use crate::fetcher::{ItemOf, PageFetcher};
use crate::page::{FetchOutcome, Page};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type SuccessCallback<P> = Box<dyn Fn(P) + Send + Sync>;
type ErrorCallback<E> = Box<dyn Fn(E) + Send + Sync>;

/// State shared by every handle of one controller
struct Shared<F: PageFetcher> {
    fetcher: F,
    state: watch::Sender<ControllerState<ItemOf<F>>>,
    in_flight: AtomicUsize,
    overlap: OverlapPolicy,
    on_success: Option<SuccessCallback<F::Page>>,
    on_error: Option<ErrorCallback<F::Error>>,
}

/// Incremental pagination controller
///
/// Cloning yields another handle to the same controller, which is how a
/// spawned load and the presentation layer share state.
pub struct PaginationController<F: PageFetcher> {
    shared: Arc<Shared<F>>,
}

impl<F: PageFetcher> Clone for PaginationController<F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<F: PageFetcher> fmt::Debug for PaginationController<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("PaginationController")
            .field("page_index", &state.page_index)
            .field("items", &state.items.len())
            .field("in_flight", &self.shared.in_flight.load(Ordering::Acquire))
            .field("overlap", &self.shared.overlap)
            .finish_non_exhaustive()
    }
}

/// Marks one fetch as pending until dropped
struct InFlight<'a> {
    count: &'a AtomicUsize,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::AcqRel);
    }
}

impl<F: PageFetcher> Shared<F> {
    fn begin_load(&self) -> Option<InFlight<'_>> {
        match self.overlap {
            OverlapPolicy::Skip => self
                .in_flight
                .compare_exchange(0, 1, Ordering::AcqRel, Ordering::Acquire)
                .ok()?,
            OverlapPolicy::Allow => self.in_flight.fetch_add(1, Ordering::AcqRel),
        };
        Some(InFlight {
            count: &self.in_flight,
        })
    }
}

impl<F, E> PaginationController<F>
where
    F: PageFetcher,
    F::Page: Page<Item = E>,
    E: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a controller starting at page 0
    pub fn new(fetcher: F) -> Self {
        Self::builder(fetcher).build()
    }

    /// Create a controller starting at `initial_page`
    pub fn with_initial_page(fetcher: F, initial_page: u32) -> Self {
        Self::builder(fetcher).initial_page(initial_page).build()
    }

    /// Create a controller from a config
    pub fn with_config(fetcher: F, config: ControllerConfig) -> Self {
        Self::builder(fetcher).config(config).build()
    }

    /// Start building a controller
    pub fn builder(fetcher: F) -> ControllerBuilder<F> {
        ControllerBuilder::new(fetcher)
    }

    /// Whether the consumer reached the end of the list
    ///
    /// True iff items were loaded and `candidate` equals the last one.
    /// Duplicate values compare equal, so an earlier item equal to the last
    /// one also answers true.
    pub fn should_load_more(&self, candidate: &E) -> bool {
        self.shared.state.borrow().is_last(candidate)
    }

    /// Request the next page without waiting for it
    ///
    /// The fetch runs on the Tokio runtime; its effects and callbacks land
    /// when it resolves. Must be called from within a runtime.
    pub fn load_more(&self) -> JoinHandle<LoadStatus> {
        let controller = self.clone();
        tokio::spawn(async move { controller.fetch_next().await })
    }

    /// Fetch the next page on the current task
    pub async fn fetch_next(&self) -> LoadStatus {
        let shared = &*self.shared;

        let Some(guard) = shared.begin_load() else {
            debug!("Load skipped: a page fetch is already pending");
            return LoadStatus::Skipped;
        };

        let page_index = shared.state.borrow().page_index;
        if page_index == u32::MAX {
            warn!("Page index {} cannot advance, not fetching", page_index);
            return LoadStatus::Exhausted { page_index };
        }
        debug!("Requesting page {}", page_index);

        match shared.fetcher.fetch(page_index).await {
            FetchOutcome::Success(page) => {
                let count = page.len();
                let appended = shared
                    .state
                    .send_if_modified(|state| state.append_page(page.items()));
                drop(guard);

                // An overlapping load already took the last index
                if !appended {
                    warn!("Page {} dropped: page index cannot advance", page_index);
                    return LoadStatus::Exhausted { page_index };
                }

                debug!("Page {}: appended {} items", page_index, count);

                if let Some(on_success) = &shared.on_success {
                    on_success(page);
                }
                LoadStatus::Loaded { page_index, count }
            }
            FetchOutcome::Failure(err) => {
                drop(guard);
                warn!("Page {} fetch failed", page_index);

                match &shared.on_error {
                    Some(on_error) => on_error(err),
                    None => debug!("No error callback set, dropping page {} error", page_index),
                }
                LoadStatus::Failed { page_index }
            }
        }
    }

    /// Snapshot of the loaded items
    pub fn items(&self) -> Vec<E> {
        self.shared.state.borrow().items.clone()
    }

    /// Snapshot of items and page index
    pub fn state(&self) -> ControllerState<E> {
        self.shared.state.borrow().clone()
    }

    /// Subscribe to changes
    pub fn subscribe(&self) -> ItemsView<E> {
        ItemsView::new(self.shared.state.subscribe())
    }
}

impl<F: PageFetcher> PaginationController<F> {
    /// Index of the next page to fetch
    pub fn page_index(&self) -> u32 {
        self.shared.state.borrow().page_index
    }

    /// Number of items loaded
    pub fn len(&self) -> usize {
        self.shared.state.borrow().len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().is_empty()
    }

    /// Whether a fetch is pending
    pub fn is_loading(&self) -> bool {
        self.shared.in_flight.load(Ordering::Acquire) > 0
    }

    /// Overlap policy in effect
    pub fn overlap(&self) -> OverlapPolicy {
        self.shared.overlap
    }

    /// The injected fetcher
    pub fn fetcher(&self) -> &F {
        &self.shared.fetcher
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for a pagination controller
pub struct ControllerBuilder<F: PageFetcher> {
    fetcher: F,
    config: ControllerConfig,
    on_success: Option<SuccessCallback<F::Page>>,
    on_error: Option<ErrorCallback<F::Error>>,
}

impl<F: PageFetcher> fmt::Debug for ControllerBuilder<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBuilder")
            .field("config", &self.config)
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish_non_exhaustive()
    }
}

impl<F: PageFetcher> ControllerBuilder<F> {
    /// Create a builder around a fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            config: ControllerConfig::default(),
            on_success: None,
            on_error: None,
        }
    }

    /// Apply a whole config
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the first page index
    pub fn initial_page(mut self, initial_page: u32) -> Self {
        self.config.initial_page = initial_page;
        self
    }

    /// Set the overlap policy
    pub fn overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.config.overlap = overlap;
        self
    }

    /// Called with each fetched page, after its items were appended
    pub fn on_success(mut self, callback: impl Fn(F::Page) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called with each fetch error
    pub fn on_error(mut self, callback: impl Fn(F::Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Build the controller
    pub fn build(self) -> PaginationController<F> {
        let (state, _) = watch::channel(ControllerState::new(self.config.initial_page));

        PaginationController {
            shared: Arc::new(Shared {
                fetcher: self.fetcher,
                state,
                in_flight: AtomicUsize::new(0),
                overlap: self.config.overlap,
                on_success: self.on_success,
                on_error: self.on_error,
            }),
        }
    }
}
