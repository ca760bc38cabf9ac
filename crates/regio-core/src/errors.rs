//! Cross-cutting error types for regio.
//!
//! These are the error kinds that cross crate boundaries: what the parser,
//! any `RegionStore`, and any `RegionSource` can report. Crate-specific errors
//! (`DatabaseError`, `RemoteError`, `ResolveError`) live in their own crates
//! and convert into or wrap these.

use thiserror::Error;

/// A remote payload could not be turned into region records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The response body was empty or whitespace only.
    #[error("empty response body")]
    EmptyResponse,

    /// The body was not a JSON array of objects.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// A record lacks a required field (or the field is null).
    #[error("record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A required field is present but has the wrong shape.
    #[error("record {index}: invalid field '{field}': {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
}

/// Errors reported by a `RegionStore` implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store rejected an insert because the row already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The referenced parent row is not persisted.
    #[error("missing parent: {0}")]
    MissingParent(String),

    /// Anything else the backend reports.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Whether this failure is the non-fatal duplicate-insert condition.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }
}

/// A remote fetch failed before a body could be handed to the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// Connection, TLS, timeout, or body read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status.
    #[error("remote returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The remote answered 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}
