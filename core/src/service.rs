//! Stateful credit card service backing a list view.
//!
//! # Design
//! `CardService` pairs the stateless `CardClient` with a `Transport` and a
//! `CardStore`. Every failure (transport, non-2xx, decoding) is caught here
//! and recorded as a readable string in `last_error`; nothing is returned to
//! the caller as an error.
//!
//! - `list` clears `last_error`, raises `is_loading`, and on success
//!   overwrites the mirror and pagination wholesale.
//! - `update` shallow-merges the server echo into the matching mirror entry.
//! - `get_by_id` never touches the mirror.
//!
//! Overlapping calls are not coordinated: whichever response resolves last
//! determines the mirror.

use tracing::{debug, warn};

use crate::client::CardClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::state::{CardListState, CardStore, LoadingGuard};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CardPatch, CreditCard, CreditCardFilters, CreditCardResponse};

const LIST_FAILED: &str = "failed to fetch credit cards";
const UPDATE_FAILED: &str = "failed to update credit card";
const GET_FAILED: &str = "failed to fetch credit card";

pub struct CardService<T: Transport> {
    client: CardClient,
    transport: T,
    store: CardStore,
}

impl CardService<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.client(), ReqwestTransport::new())
    }
}

impl<T: Transport> CardService<T> {
    pub fn new(client: CardClient, transport: T) -> Self {
        Self {
            client,
            transport,
            store: CardStore::new(),
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn snapshot(&self) -> CardListState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<CardListState> {
        self.store.subscribe()
    }

    /// Fetch one page and replace the mirror with it. On failure the previous
    /// items and pagination stay visible.
    pub async fn list(&self, filters: &CreditCardFilters) {
        let _loading = LoadingGuard::start(&self.store);

        match self.fetch_page(filters).await {
            Ok(page) => {
                debug!(
                    count = page.data.len(),
                    page = page.pagination.page,
                    total = page.pagination.total,
                    "credit cards fetched"
                );
                self.store.modify(|state| {
                    state.items = page.data;
                    state.pagination = page.pagination;
                });
            }
            Err(err) => self.record_failure(LIST_FAILED, &err),
        }
    }

    /// Send a partial update. Returns the server's payload as received, or
    /// `None` on failure. A successful update for an id that is not in the
    /// mirror leaves the mirror untouched.
    pub async fn update(&self, id: i64, patch: &CardPatch) -> Option<CardPatch> {
        let updated = match self.send_update(id, patch).await {
            Ok(updated) => updated,
            Err(err) => {
                self.record_failure(UPDATE_FAILED, &err);
                return None;
            }
        };

        let merged = self.store.modify_if(|state| {
            match state.items.iter_mut().find(|card| card.id == id) {
                Some(card) => {
                    card.apply(&updated);
                    true
                }
                None => false,
            }
        });
        if !merged {
            debug!(id, "updated credit card is not in the current page");
        }

        Some(updated)
    }

    /// Fetch a single card. The result is handed back without being added to
    /// the mirror.
    pub async fn get_by_id(&self, id: i64) -> Option<CreditCard> {
        match self.fetch_card(id).await {
            Ok(card) => Some(card),
            Err(err) => {
                self.record_failure(GET_FAILED, &err);
                None
            }
        }
    }

    async fn fetch_page(&self, filters: &CreditCardFilters) -> Result<CreditCardResponse, ApiError> {
        let request = self.client.build_list_cards(filters);
        debug!(method = request.method.as_str(), url = %request.url, "listing credit cards");
        let response = self.transport.execute(request).await?;
        self.client.parse_list_cards(response)
    }

    async fn send_update(&self, id: i64, patch: &CardPatch) -> Result<CardPatch, ApiError> {
        let request = self.client.build_update_card(id, patch)?;
        debug!(method = request.method.as_str(), url = %request.url, "updating credit card");
        let response = self.transport.execute(request).await?;
        self.client.parse_update_card(response)
    }

    async fn fetch_card(&self, id: i64) -> Result<CreditCard, ApiError> {
        let request = self.client.build_get_card(id);
        debug!(method = request.method.as_str(), url = %request.url, "fetching credit card");
        let response = self.transport.execute(request).await?;
        self.client.parse_get_card(response)
    }

    fn record_failure(&self, context: &str, err: &ApiError) {
        warn!(error = %err, "{context}");
        let message = format!("{context}: {err}");
        self.store.modify(|state| state.last_error = Some(message));
    }
}
