//! API client core for the credit card listing service.
//!
//! # Overview
//! Two layers:
//! - `CardClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network (host-does-IO pattern).
//! - `CardService` drives a `CardClient` through a `Transport` and keeps the
//!   observable list state (`items`, `is_loading`, `last_error`,
//!   `pagination`) in a `CardStore`.
//!
//! # Design
//! - `CardClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the `Transport` trait is the only place that
//!   performs it.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod state;
pub mod transport;
pub mod types;

pub use client::CardClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::CardService;
pub use state::{CardListState, CardStore};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    Bank, CardPatch, CreditCard, CreditCardFilters, CreditCardResponse, Feature, FeatureKind, Money,
    Pagination, SortOrder,
};
