//! [`RegionStore`] implementation.
//!
//! A batch runs in one transaction. UNIQUE violations are counted and
//! skipped (SQLite aborts only the offending statement); any other failure
//! rolls the whole level back.

use std::future::Future;

use regio_core::entities::{City, County, NewCity, NewCounty, NewProvince, Province};
use regio_core::{BatchReport, RegionBatch, RegionStore, StoreError};

use crate::RegionDb;
use crate::error::DatabaseError;
use crate::repos::{city, county, province};

impl RegionDb {
    async fn apply_batch(&self, batch: &RegionBatch) -> Result<BatchReport, DatabaseError> {
        let _guard = self.access.write().await;
        let tx = self.conn.transaction().await?;

        match insert_rows(&tx, batch).await {
            Ok(report) => {
                tx.commit().await?;
                Ok(report)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback after failed batch");
                }
                Err(e)
            }
        }
    }
}

async fn insert_rows(
    conn: &libsql::Connection,
    batch: &RegionBatch,
) -> Result<BatchReport, DatabaseError> {
    let mut report = BatchReport::default();
    match batch {
        RegionBatch::Provinces(rows) => {
            for row in rows {
                tally(&mut report, province::insert(conn, row).await)?;
            }
        }
        RegionBatch::Cities(rows) => {
            for row in rows {
                tally(&mut report, city::insert(conn, row).await)?;
            }
        }
        RegionBatch::Counties(rows) => {
            for row in rows {
                tally(&mut report, county::insert(conn, row).await)?;
            }
        }
    }
    Ok(report)
}

fn tally(report: &mut BatchReport, result: Result<i64, DatabaseError>) -> Result<(), DatabaseError> {
    match result {
        Ok(_) => report.inserted += 1,
        Err(DatabaseError::Duplicate(msg)) => {
            tracing::trace!(%msg, "skipping duplicate row");
            report.skipped_duplicates += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[allow(clippy::manual_async_fn)]
impl RegionStore for RegionDb {
    fn query_provinces(&self) -> impl Future<Output = Result<Vec<Province>, StoreError>> + Send {
        async move {
            let _guard = self.access.read().await;
            Ok(province::list(&self.conn).await?)
        }
    }

    fn query_cities(
        &self,
        province_id: i64,
    ) -> impl Future<Output = Result<Vec<City>, StoreError>> + Send {
        async move {
            let _guard = self.access.read().await;
            Ok(city::list_for_province(&self.conn, province_id).await?)
        }
    }

    fn query_counties(
        &self,
        city_id: i64,
    ) -> impl Future<Output = Result<Vec<County>, StoreError>> + Send {
        async move {
            let _guard = self.access.read().await;
            Ok(county::list_for_city(&self.conn, city_id).await?)
        }
    }

    fn insert_province(
        &self,
        new: &NewProvince,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move {
            let _guard = self.access.write().await;
            Ok(province::insert(&self.conn, new).await?)
        }
    }

    fn insert_city(&self, new: &NewCity) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move {
            let _guard = self.access.write().await;
            Ok(city::insert(&self.conn, new).await?)
        }
    }

    fn insert_county(
        &self,
        new: &NewCounty,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send {
        async move {
            let _guard = self.access.write().await;
            Ok(county::insert(&self.conn, new).await?)
        }
    }

    fn insert_batch(
        &self,
        batch: &RegionBatch,
    ) -> impl Future<Output = Result<BatchReport, StoreError>> + Send {
        async move {
            let report = self.apply_batch(batch).await?;
            tracing::debug!(
                level = %batch.level(),
                inserted = report.inserted,
                skipped = report.skipped_duplicates,
                "batch persisted"
            );
            Ok(report)
        }
    }
}
