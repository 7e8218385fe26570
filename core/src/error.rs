//! Error types for the todo API client.
//!
//! # Design
//! `NotFound`, `Unauthorized` and `Forbidden` get dedicated variants because
//! callers distinguish a missing record, a missing session and the owner rule
//! from "the server returned an unexpected status." All other non-2xx
//! responses land in `HttpError` with the raw status code and body.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by hosts executing
/// requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist for this caller.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401 — the request carried no usable identity.
    #[error("not signed in")]
    Unauthorized,

    /// The server returned 403 — the todo belongs to another owner.
    #[error("todo belongs to another owner")]
    Forbidden,

    /// The server returned a non-2xx status not covered above.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The round-trip never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors raised while loading the backend outputs document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid outputs document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("outputs document has no data.url")]
    MissingUrl,
}
