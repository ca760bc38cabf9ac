//! Per-table row access.
//!
//! Each submodule owns the SQL for one table. Writers take a plain
//! `&libsql::Connection` so the same statement runs standalone or inside a
//! batch transaction.

pub mod city;
pub mod county;
pub mod province;

use crate::error::DatabaseError;

/// Run an INSERT and return the new row id.
///
/// Callers must hold the write lock: the id is read back from the connection.
pub(crate) async fn insert_returning_id(
    conn: &libsql::Connection,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<i64, DatabaseError> {
    conn.execute(sql, params)
        .await
        .map_err(DatabaseError::from_write)?;
    Ok(conn.last_insert_rowid())
}
