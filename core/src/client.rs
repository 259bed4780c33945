//! Stateless HTTP request builder and response parser for the credit card API.
//!
//! # Design
//! `CardClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping this layer
//! deterministic and free of I/O.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CardPatch, CreditCard, CreditCardFilters, CreditCardResponse};

/// Synchronous, stateless client for the credit card API.
#[derive(Debug, Clone)]
pub struct CardClient {
    base_url: String,
}

impl CardClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/cards?{query}`. The `?` is always present, even when no
    /// filter is set.
    pub fn build_list_cards(&self, filters: &CreditCardFilters) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/cards?{}", self.base_url, list_query(filters)),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_card(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/cards/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_update_card(&self, id: i64, patch: &CardPatch) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(patch).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url: format!("{}/cards/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_cards(&self, response: HttpResponse) -> Result<CreditCardResponse, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_card(&self, response: HttpResponse) -> Result<CreditCard, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// The server may echo the full record or only the changed fields, so the
    /// body is decoded as a sparse `CardPatch`.
    pub fn parse_update_card(&self, response: HttpResponse) -> Result<CardPatch, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

/// Encode the present filters in `sort_by`, `sort_order`, `page` order.
/// An empty `sort_by` or a `page` of zero counts as absent.
fn list_query(filters: &CreditCardFilters) -> String {
    let mut pairs: Vec<String> = Vec::new();
    if let Some(sort_by) = filters.sort_by.as_deref().filter(|s| !s.is_empty()) {
        pairs.push(format!("sort_by={}", urlencoding::encode(sort_by)));
    }
    if let Some(order) = filters.sort_order {
        pairs.push(format!("sort_order={}", order.as_str()));
    }
    if let Some(page) = filters.page.filter(|p| *p > 0) {
        pairs.push(format!("page={page}"));
    }
    pairs.join("&")
}

/// Any 2xx is success; everything else is an `HttpError`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
