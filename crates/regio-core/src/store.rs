//! Persistence contract for region rows.
//!
//! The resolver only needs query-by-parent and insert. There is no update or
//! delete path: the store is append-only.
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`); the resolver calls
//!   them from worker tasks without external locking.
//! - `query_*` results must come back in a stable order (insertion order).
//! - A duplicate insert reports [`StoreError::DuplicateKey`]; an insert whose
//!   parent is not persisted reports [`StoreError::MissingParent`].

use std::future::Future;

use serde::Serialize;

use crate::entities::{City, County, NewCity, NewCounty, NewProvince, Province};
use crate::errors::StoreError;
use crate::level::Level;

/// One level's worth of parsed rows, persisted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionBatch {
    Provinces(Vec<NewProvince>),
    Cities(Vec<NewCity>),
    Counties(Vec<NewCounty>),
}

impl RegionBatch {
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::Provinces(_) => Level::Province,
            Self::Cities(_) => Level::City,
            Self::Counties(_) => Level::County,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Provinces(rows) => rows.len(),
            Self::Cities(rows) => rows.len(),
            Self::Counties(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of persisting a [`RegionBatch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub inserted: usize,
    /// Rows skipped because the store already held them.
    pub skipped_duplicates: usize,
}

/// Append-only storage for provinces, cities, and counties.
pub trait RegionStore: Send + Sync {
    /// All persisted provinces.
    fn query_provinces(&self) -> impl Future<Output = Result<Vec<Province>, StoreError>> + Send;

    /// Cities whose `province_id` matches.
    fn query_cities(
        &self,
        province_id: i64,
    ) -> impl Future<Output = Result<Vec<City>, StoreError>> + Send;

    /// Counties whose `city_id` matches.
    fn query_counties(
        &self,
        city_id: i64,
    ) -> impl Future<Output = Result<Vec<County>, StoreError>> + Send;

    /// Insert one province and return its assigned id.
    fn insert_province(
        &self,
        province: &NewProvince,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    fn insert_city(&self, city: &NewCity) -> impl Future<Output = Result<i64, StoreError>> + Send;

    fn insert_county(
        &self,
        county: &NewCounty,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    /// Persist a whole level in one unit.
    ///
    /// Duplicates are skipped and counted. Any other failure leaves the store
    /// exactly as it was before the call.
    fn insert_batch(
        &self,
        batch: &RegionBatch,
    ) -> impl Future<Output = Result<BatchReport, StoreError>> + Send;
}
