//! Observable list state.
//!
//! # Design
//! `CardListState` holds exactly the four fields a list view binds to. The
//! `CardStore` keeps it inside a `tokio::sync::watch` channel: every mutation
//! goes through the sender, so subscribers see each transition and readers
//! can take a consistent snapshot at any time.

use tokio::sync::watch;

use crate::types::{CreditCard, Pagination};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardListState {
    /// The mirror: the last page fetched by `list`, patched by `update`.
    pub items: Vec<CreditCard>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub pagination: Pagination,
}

#[derive(Debug)]
pub struct CardStore {
    tx: watch::Sender<CardListState>,
}

impl CardStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CardListState::default());
        Self { tx }
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CardListState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> CardListState {
        self.tx.borrow().clone()
    }

    pub(crate) fn modify(&self, f: impl FnOnce(&mut CardListState)) {
        self.tx.send_modify(f);
    }

    /// Like `modify`, but subscribers are only notified when `f` returns true.
    pub(crate) fn modify_if(&self, f: impl FnOnce(&mut CardListState) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears `is_loading` when dropped, so the flag is released on every exit
/// path, including a caller dropping the in-flight future.
pub(crate) struct LoadingGuard<'a> {
    store: &'a CardStore,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn start(store: &'a CardStore) -> Self {
        store.modify(|state| {
            state.is_loading = true;
            state.last_error = None;
        });
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.modify(|state| state.is_loading = false);
    }
}
