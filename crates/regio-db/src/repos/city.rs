//! City repository.

use regio_core::entities::{City, NewCity};

use crate::error::DatabaseError;
use crate::repos::insert_returning_id;

fn row_to_city(row: &libsql::Row) -> Result<City, DatabaseError> {
    Ok(City {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        code: row.get::<i64>(2)?,
        province_id: row.get::<i64>(3)?,
    })
}

pub(crate) async fn insert(conn: &libsql::Connection, city: &NewCity) -> Result<i64, DatabaseError> {
    insert_returning_id(
        conn,
        "INSERT INTO cities (name, code, province_id) VALUES (?1, ?2, ?3)",
        libsql::params![city.name.as_str(), city.code, city.province_id],
    )
    .await
}

pub(crate) async fn list_for_province(
    conn: &libsql::Connection,
    province_id: i64,
) -> Result<Vec<City>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, name, code, province_id FROM cities
             WHERE province_id = ?1 ORDER BY id",
            [province_id],
        )
        .await?;

    let mut cities = Vec::new();
    while let Some(row) = rows.next().await? {
        cities.push(row_to_city(&row)?);
    }
    Ok(cities)
}
