//! Read-only view over a controller's items
//!
//! Consumers hold an `ItemsView` to render the list and wait for changes.
//! Every successful page is published once, with its items and the new
//! page index already applied.

use super::types::ControllerState;
use futures::stream::{self, Stream};
use tokio::sync::watch;

/// Change-notifying, read-only view of loaded items
#[derive(Debug, Clone)]
pub struct ItemsView<E> {
    rx: watch::Receiver<ControllerState<E>>,
}

impl<E> ItemsView<E> {
    pub(crate) fn new(rx: watch::Receiver<ControllerState<E>>) -> Self {
        Self { rx }
    }

    /// Number of items loaded
    pub fn len(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.rx.borrow().is_empty()
    }

    /// Index of the next page the controller will fetch
    pub fn page_index(&self) -> u32 {
        self.rx.borrow().page_index
    }

    /// Run `f` against the current items without cloning them
    pub fn with_items<R>(&self, f: impl FnOnce(&[E]) -> R) -> R {
        f(&self.rx.borrow().items)
    }

    /// Whether a change was published since the last time this view looked
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change
    ///
    /// Returns `false` once the controller is gone and no further change
    /// can happen.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<E: Clone> ItemsView<E> {
    /// Snapshot of the loaded items
    pub fn items(&self) -> Vec<E> {
        self.rx.borrow().items.clone()
    }

    /// Snapshot of items and page index, marking it as seen
    pub fn snapshot(&mut self) -> ControllerState<E> {
        self.rx.borrow_and_update().clone()
    }
}

impl<E> ItemsView<E>
where
    E: Clone + Send + Sync + 'static,
{
    /// Turn the view into a stream of states
    ///
    /// The current state is not replayed. Pages published before the stream
    /// is polled again coalesce into one state. The stream ends when the
    /// controller is dropped.
    pub fn into_stream(self) -> impl Stream<Item = ControllerState<E>> + Send + 'static {
        stream::unfold(self.rx, |mut rx| async move {
            rx.changed().await.ok()?;
            let state = rx.borrow_and_update().clone();
            Some((state, rx))
        })
    }
}
