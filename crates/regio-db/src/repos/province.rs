//! Province repository.

use regio_core::entities::{NewProvince, Province};

use crate::error::DatabaseError;
use crate::repos::insert_returning_id;

fn row_to_province(row: &libsql::Row) -> Result<Province, DatabaseError> {
    Ok(Province {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        code: row.get::<i64>(2)?,
    })
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    province: &NewProvince,
) -> Result<i64, DatabaseError> {
    insert_returning_id(
        conn,
        "INSERT INTO provinces (name, code) VALUES (?1, ?2)",
        libsql::params![province.name.as_str(), province.code],
    )
    .await
}

pub(crate) async fn list(conn: &libsql::Connection) -> Result<Vec<Province>, DatabaseError> {
    let mut rows = conn
        .query("SELECT id, name, code FROM provinces ORDER BY id", ())
        .await?;

    let mut provinces = Vec::new();
    while let Some(row) = rows.next().await? {
        provinces.push(row_to_province(&row)?);
    }
    Ok(provinces)
}
