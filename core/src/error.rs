//! Error types for the credit card API client.
//!
//! # Design
//! The API does not distinguish failures by status code, so every non-2xx
//! response lands in `HttpError` with the raw status and body for debugging.
//! `CardService` folds all variants into a single human-readable string.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, read failure).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Errors raised while assembling a `ClientConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base URL must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
}
