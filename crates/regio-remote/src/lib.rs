//! # regio-remote
//!
//! HTTP [`RegionSource`] for regio.
//!
//! The region API is addressed by remote codes:
//!
//! | Level    | Request                                   |
//! |----------|-------------------------------------------|
//! | province | `GET {base}/china`                        |
//! | city     | `GET {base}/china/{province}`             |
//! | county   | `GET {base}/china/{province}/{city}`      |
//!
//! Bodies are handed back raw; parsing lives in `regio_core::parse`.

mod error;
mod http;

pub use error::RemoteError;

use std::future::Future;

use regio_config::RemoteConfig;
use regio_core::{NetworkError, RegionSource};

use crate::http::listing_body;

/// Long-lived HTTP client for the region API.
///
/// Build once and share; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Http`] if the `reqwest::Client` cannot be built
    /// (for example, no TLS backend is available).
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn provinces_url(&self) -> String {
        format!("{}/china", self.base_url)
    }

    #[must_use]
    pub fn cities_url(&self, province_code: i64) -> String {
        format!("{}/china/{province_code}", self.base_url)
    }

    #[must_use]
    pub fn counties_url(&self, province_code: i64, city_code: i64) -> String {
        format!("{}/china/{province_code}/{city_code}", self.base_url)
    }

    /// GET `url` and return the raw body.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError`] on transport failure or a non-success status.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, RemoteError> {
        tracing::debug!(url, "fetching regions");
        let body = listing_body(self.http.get(url).send().await?).await?;
        tracing::debug!(url, bytes = body.len(), "fetched regions");
        Ok(body)
    }

    async fn fetch(&self, url: String) -> Result<Vec<u8>, NetworkError> {
        self.get_bytes(&url).await.map_err(|e| {
            tracing::warn!(%url, error = %e, "region fetch failed");
            NetworkError::from(e)
        })
    }
}

impl RegionSource for RemoteClient {
    fn fetch_provinces(&self) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send {
        self.fetch(self.provinces_url())
    }

    fn fetch_cities(
        &self,
        province_code: i64,
    ) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send {
        self.fetch(self.cities_url(province_code))
    }

    fn fetch_counties(
        &self,
        province_code: i64,
        city_code: i64,
    ) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send {
        self.fetch(self.counties_url(province_code, city_code))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client(base_url: &str) -> RemoteClient {
        RemoteClient::new(&RemoteConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn urls_follow_code_addressing() {
        let c = client("http://guolin.tech/api");
        assert_eq!(c.provinces_url(), "http://guolin.tech/api/china");
        assert_eq!(c.cities_url(16), "http://guolin.tech/api/china/16");
        assert_eq!(c.counties_url(16, 116), "http://guolin.tech/api/china/16/116");
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let c = client("http://localhost:8080/api///");
        assert_eq!(c.base_url(), "http://localhost:8080/api");
        assert_eq!(c.provinces_url(), "http://localhost:8080/api/china");
    }

    #[test]
    fn remote_errors_map_to_network_kinds() {
        let api: NetworkError = RemoteError::Api {
            status: 404,
            message: "nope".into(),
        }
        .into();
        assert_eq!(
            api,
            NetworkError::Status {
                status: 404,
                message: "nope".into()
            }
        );

        let limited: NetworkError = RemoteError::RateLimited {
            retry_after_secs: 5,
        }
        .into();
        assert_eq!(limited, NetworkError::RateLimited { retry_after_secs: 5 });
    }
}
