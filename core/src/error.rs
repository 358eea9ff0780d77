//! Error types for the grade API client.
//!
//! # Design
//! Configuration lookups never fail, so errors only come from the endpoint
//! layer: a missing required parameter, the transport, or an unexpected
//! response. `NotFound` gets a dedicated variant because callers usually
//! treat "no such grade" differently from other non-success statuses.

use thiserror::Error;

/// Failure reported by an `HttpTransport` implementation.
#[derive(Debug, Clone, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors returned by the grade controller build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status the endpoint does not expect.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A required parameter was empty when the request was built.
    #[error("required parameter `{0}` was null or undefined")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors from wiring up an `ApiModule`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleError {
    #[error("ApiModule is already loaded; provide the root configuration once")]
    AlreadyLoaded,

    #[error("ApiModule has no root configuration; call for_root first")]
    NotLoaded,

    #[error("an HTTP transport is required to build API services")]
    MissingTransport,
}
