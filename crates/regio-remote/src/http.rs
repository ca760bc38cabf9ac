//! Turning a region API response into a body the parser can take.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::RemoteError;

/// Wait used when a 429 names no delay in whole seconds.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Error pages from the region host are HTML; keep only a short prefix.
const ERROR_BODY_LIMIT: usize = 200;

/// Raw body of a successful region listing.
///
/// # Errors
///
/// [`RemoteError::RateLimited`] for 429, [`RemoteError::Api`] for any other
/// non-success status, [`RemoteError::Http`] if the body cannot be read.
pub async fn listing_body(resp: reqwest::Response) -> Result<Vec<u8>, RemoteError> {
    let status = resp.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RemoteError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(RemoteError::Api {
            status: status.as_u16(),
            message: error_excerpt(&body),
        });
    }
    Ok(resp.bytes().await?.to_vec())
}

fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn error_excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(ERROR_BODY_LIMIT) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
