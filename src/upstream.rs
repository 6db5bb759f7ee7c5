//! Shared plumbing for third-party HTTP providers.
//!
//! The indexer, positions and swap-aggregator clients all speak plain
//! HTTPS+JSON with different error-body shapes; they share the transport
//! error type and client construction defined here.

use std::time::Duration;

use thiserror::Error;

/// Errors from a third-party HTTP provider.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Provider answered with a non-2xx status. The message is extracted
    /// from the provider's error body when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Request never completed (connect failure, timeout, TLS, ...).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered 2xx with a body we could not decode.
    #[error("invalid upstream response body: {0}")]
    Decode(String),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Build the reqwest client used for all provider calls.
pub fn http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}
