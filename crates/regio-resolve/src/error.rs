//! Resolve error types for regio-resolve.

use regio_core::{NavError, NetworkError, ParseError, StoreError};
use thiserror::Error;

/// The only text a user is shown for any failed load.
pub const LOAD_FAILED: &str = "load failed";

/// Why a level could not be resolved.
///
/// Every variant is recoverable: the caller stays where it is and may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The remote answered successfully but listed nothing for this parent.
    #[error("remote returned no regions")]
    EmptyResponse,

    /// The task running the resolve stopped before reporting back.
    #[error("resolve task stopped: {0}")]
    Interrupted(String),

    /// A resolved listing could not be applied to the navigation state.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavError),
}

impl ResolveError {
    /// User-facing message. The same for every kind.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        LOAD_FAILED
    }
}
