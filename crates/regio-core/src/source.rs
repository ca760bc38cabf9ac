//! Remote fetch contract.
//!
//! Sources are addressed by remote codes, never by store ids. Each call
//! completes exactly once with either the raw body or a [`NetworkError`].

use std::future::Future;

use crate::errors::NetworkError;

pub trait RegionSource: Send + Sync {
    /// Raw body of the province list.
    fn fetch_provinces(&self) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send;

    /// Raw body of the city list for one province.
    fn fetch_cities(
        &self,
        province_code: i64,
    ) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send;

    /// Raw body of the county list for one city.
    fn fetch_counties(
        &self,
        province_code: i64,
        city_code: i64,
    ) -> impl Future<Output = Result<Vec<u8>, NetworkError>> + Send;
}
