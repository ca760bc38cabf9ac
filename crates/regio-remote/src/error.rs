//! Remote source error types.

use regio_core::NetworkError;
use thiserror::Error;

/// Errors that can occur when talking to the region API.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },
}

impl From<RemoteError> for NetworkError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Http(e) => Self::Transport(e.to_string()),
            RemoteError::Api { status, message } => Self::Status { status, message },
            RemoteError::RateLimited { retry_after_secs } => Self::RateLimited { retry_after_secs },
        }
    }
}
