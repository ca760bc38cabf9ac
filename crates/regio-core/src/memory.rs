//! In-memory [`RegionStore`].
//!
//! Same uniqueness and parent rules as the persistent store, kept in plain
//! vectors behind a mutex. Used by tests and by callers that do not need the
//! cache to survive the process.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};

use crate::entities::{City, County, NewCity, NewCounty, NewProvince, Province};
use crate::errors::StoreError;
use crate::store::{BatchReport, RegionBatch, RegionStore};

#[derive(Debug, Clone)]
struct Tables {
    provinces: Vec<Province>,
    cities: Vec<City>,
    counties: Vec<County>,
    next_province_id: i64,
    next_city_id: i64,
    next_county_id: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            provinces: Vec::new(),
            cities: Vec::new(),
            counties: Vec::new(),
            next_province_id: 1,
            next_city_id: 1,
            next_county_id: 1,
        }
    }
}

impl Tables {
    fn insert_province(&mut self, new: &NewProvince) -> Result<i64, StoreError> {
        if self.provinces.iter().any(|p| p.code == new.code) {
            return Err(StoreError::DuplicateKey(format!(
                "province code {}",
                new.code
            )));
        }
        let id = self.next_province_id;
        self.next_province_id += 1;
        self.provinces.push(Province {
            id,
            name: new.name.clone(),
            code: new.code,
        });
        Ok(id)
    }

    fn insert_city(&mut self, new: &NewCity) -> Result<i64, StoreError> {
        if !self.provinces.iter().any(|p| p.id == new.province_id) {
            return Err(StoreError::MissingParent(format!(
                "province id {}",
                new.province_id
            )));
        }
        if self
            .cities
            .iter()
            .any(|c| c.province_id == new.province_id && c.code == new.code)
        {
            return Err(StoreError::DuplicateKey(format!(
                "city code {} in province {}",
                new.code, new.province_id
            )));
        }
        let id = self.next_city_id;
        self.next_city_id += 1;
        self.cities.push(City {
            id,
            name: new.name.clone(),
            code: new.code,
            province_id: new.province_id,
        });
        Ok(id)
    }

    fn insert_county(&mut self, new: &NewCounty) -> Result<i64, StoreError> {
        if !self.cities.iter().any(|c| c.id == new.city_id) {
            return Err(StoreError::MissingParent(format!(
                "city id {}",
                new.city_id
            )));
        }
        if self
            .counties
            .iter()
            .any(|c| c.city_id == new.city_id && c.weather_id == new.weather_id)
        {
            return Err(StoreError::DuplicateKey(format!(
                "county {} in city {}",
                new.weather_id, new.city_id
            )));
        }
        let id = self.next_county_id;
        self.next_county_id += 1;
        self.counties.push(County {
            id,
            name: new.name.clone(),
            weather_id: new.weather_id.clone(),
            city_id: new.city_id,
        });
        Ok(id)
    }

    fn apply(&mut self, batch: &RegionBatch) -> Result<BatchReport, StoreError> {
        let mut report = BatchReport::default();
        let mut tally = |result: Result<i64, StoreError>| match result {
            Ok(_) => {
                report.inserted += 1;
                Ok(())
            }
            Err(e) if e.is_duplicate() => {
                report.skipped_duplicates += 1;
                Ok(())
            }
            Err(e) => Err(e),
        };

        match batch {
            RegionBatch::Provinces(rows) => {
                for row in rows {
                    tally(self.insert_province(row))?;
                }
            }
            RegionBatch::Cities(rows) => {
                for row in rows {
                    tally(self.insert_city(row))?;
                }
            }
            RegionBatch::Counties(rows) => {
                for row in rows {
                    tally(self.insert_county(row))?;
                }
            }
        }
        Ok(report)
    }
}

/// A [`RegionStore`] that lives for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryRegionStore {
    tables: Mutex<Tables>,
}

impl MemoryRegionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }

    fn with_tables<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut tables = self.lock()?;
        f(&mut tables)
    }
}

#[allow(clippy::manual_async_fn)]
impl RegionStore for MemoryRegionStore {
    fn query_provinces(&self) -> impl Future<Output = Result<Vec<Province>, StoreError>> + Send {
        async move { self.with_tables(|t| Ok(t.provinces.clone())) }
    }

    fn query_cities(
        &self,
        province_id: i64,
    ) -> impl Future<Output = Result<Vec<City>, StoreError>> + Send {
        async move {
            self.with_tables(|t| {
                Ok(t.cities
                    .iter()
                    .filter(|c| c.province_id == province_id)
                    .cloned()
                    .collect())
            })
        }
    }

    fn query_counties(
        &self,
        city_id: i64,
    ) -> impl Future<Output = Result<Vec<County>, StoreError>> + Send {
        async move {
            self.with_tables(|t| {
                Ok(t.counties
                    .iter()
                    .filter(|c| c.city_id == city_id)
                    .cloned()
                    .collect())
            })
        }
    }

    fn insert_province(
        &self,
        province: &NewProvince,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move { self.with_tables(|t| t.insert_province(province)) }
    }

    fn insert_city(&self, city: &NewCity) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move { self.with_tables(|t| t.insert_city(city)) }
    }

    fn insert_county(
        &self,
        county: &NewCounty,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move { self.with_tables(|t| t.insert_county(county)) }
    }

    fn insert_batch(
        &self,
        batch: &RegionBatch,
    ) -> impl Future<Output = Result<BatchReport, StoreError>> + Send {
        async move {
            self.with_tables(|t| {
                // Applied to a scratch copy so a failing row leaves nothing behind.
                let mut scratch = t.clone();
                let report = scratch.apply(batch)?;
                *t = scratch;
                Ok(report)
            })
        }
    }
}
