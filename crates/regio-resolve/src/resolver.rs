//! Cache-first resolution.
//!
//! ```text
//! query store ──non-empty──▶ return (no network)
//!      │ empty
//!      ▼
//! lead flight(level, parent) ─▶ query store again ──non-empty──▶ return
//!      │ still empty                        ▲
//!      ▼                                    │ Ok: re-read store
//! fetch ─▶ parse ─▶ insert_batch ─▶ query ──┴─▶ followers
//! ```
//!
//! A miss that finds a flight already running follows it: on success it
//! re-reads the store, on failure it returns the leader's error.
//!
//! The caller only ever sees rows read back from the store, never the
//! freshly parsed records.

use std::sync::Arc;

use regio_core::entities::{City, County, Province};
use regio_core::parse::parse_batch;
use regio_core::{
    BatchReport, Listing, NetworkError, RegionSource, RegionStore, ResolveRequest, StoreError,
};

use crate::error::ResolveError;
use crate::flight::{Flight, FlightGate, FlightKey};

pub struct CacheFirstResolver<S, R> {
    store: Arc<S>,
    source: Arc<R>,
    flights: FlightGate<Result<(), ResolveError>>,
}

impl<S, R> CacheFirstResolver<S, R>
where
    S: RegionStore,
    R: RegionSource,
{
    pub fn new(store: Arc<S>, source: Arc<R>) -> Self {
        Self {
            store,
            source,
            flights: FlightGate::new(),
        }
    }

    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub const fn source(&self) -> &Arc<R> {
        &self.source
    }

    /// Resolve one level, fetching and persisting it on a cache miss.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the store cannot be read or written, the
    /// fetch fails, the body does not parse, or the remote listed nothing.
    /// Nothing is persisted for the parent in any of these cases.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<Listing, ResolveError> {
        let level = request.level();
        let parent_id = request.parent_id();

        loop {
            let cached = self.query(request).await?;
            if !cached.is_empty() {
                tracing::debug!(%level, ?parent_id, rows = cached.len(), "cache hit");
                return Ok(cached);
            }

            match self.flights.enter(FlightKey::from(request)) {
                Flight::Leader(leader) => {
                    let result = self.lead(request).await;
                    leader.publish(result.as_ref().map(|_| ()).map_err(Clone::clone));
                    return result;
                }
                Flight::Follower(follower) => match follower.outcome().await {
                    Some(Ok(())) => {
                        tracing::debug!(%level, ?parent_id, "filled by concurrent resolve");
                        return Ok(self.query(request).await?);
                    }
                    Some(Err(e)) => return Err(e),
                    // The leader went away without an outcome; start over.
                    None => {}
                },
            }
        }
    }

    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn provinces(&self) -> Result<Vec<Province>, ResolveError> {
        let listing = self.resolve(&ResolveRequest::Provinces).await?;
        Ok(listing.into_provinces().unwrap_or_default())
    }

    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn cities(&self, province: &Province) -> Result<Vec<City>, ResolveError> {
        let listing = self.resolve(&ResolveRequest::cities_of(province)).await?;
        Ok(listing.into_cities().unwrap_or_default())
    }

    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub async fn counties(
        &self,
        province: &Province,
        city: &City,
    ) -> Result<Vec<County>, ResolveError> {
        let listing = self
            .resolve(&ResolveRequest::counties_of(province, city))
            .await?;
        Ok(listing.into_counties().unwrap_or_default())
    }

    /// Fill a missed level and read it back. Runs once per flight.
    async fn lead(&self, request: &ResolveRequest) -> Result<Listing, ResolveError> {
        let level = request.level();
        let parent_id = request.parent_id();

        // A previous flight may have landed between the miss and taking the lead.
        let cached = self.query(request).await?;
        if !cached.is_empty() {
            return Ok(cached);
        }

        let report = self.fill(request).await.inspect_err(|e| {
            tracing::warn!(%level, ?parent_id, error = %e, "resolve failed");
        })?;
        tracing::info!(
            %level,
            ?parent_id,
            inserted = report.inserted,
            skipped = report.skipped_duplicates,
            "fetched and persisted"
        );

        let listing = self.query(request).await?;
        if listing.is_empty() {
            tracing::warn!(%level, ?parent_id, "remote listed no regions");
            return Err(ResolveError::EmptyResponse);
        }
        Ok(listing)
    }

    async fn query(&self, request: &ResolveRequest) -> Result<Listing, StoreError> {
        Ok(match *request {
            ResolveRequest::Provinces => Listing::Provinces(self.store.query_provinces().await?),
            ResolveRequest::Cities { province_id, .. } => {
                Listing::Cities(self.store.query_cities(province_id).await?)
            }
            ResolveRequest::Counties { city_id, .. } => {
                Listing::Counties(self.store.query_counties(city_id).await?)
            }
        })
    }

    async fn fetch(&self, request: &ResolveRequest) -> Result<Vec<u8>, NetworkError> {
        match *request {
            ResolveRequest::Provinces => self.source.fetch_provinces().await,
            ResolveRequest::Cities { province_code, .. } => {
                self.source.fetch_cities(province_code).await
            }
            ResolveRequest::Counties {
                province_code,
                city_code,
                ..
            } => self.source.fetch_counties(province_code, city_code).await,
        }
    }

    async fn fill(&self, request: &ResolveRequest) -> Result<BatchReport, ResolveError> {
        let body = self.fetch(request).await?;
        let batch = parse_batch(request, &body)?;
        Ok(self.store.insert_batch(&batch).await?)
    }
}
