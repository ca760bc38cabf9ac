use regio_core::entities::{County, NewCounty};

use crate::error::DatabaseError;
use crate::repos::insert_returning_id;

fn row_to_county(row: &libsql::Row) -> Result<County, DatabaseError> {
    Ok(County {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        weather_id: row.get::<String>(2)?,
        city_id: row.get::<i64>(3)?,
    })
}

pub(crate) async fn insert(
    conn: &libsql::Connection,
    county: &NewCounty,
) -> Result<i64, DatabaseError> {
    insert_returning_id(
        conn,
        "INSERT INTO counties (name, weather_id, city_id) VALUES (?1, ?2, ?3)",
        libsql::params![
            county.name.as_str(),
            county.weather_id.as_str(),
            county.city_id
        ],
    )
    .await
}

pub(crate) async fn list_for_city(
    conn: &libsql::Connection,
    city_id: i64,
) -> Result<Vec<County>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, name, weather_id, city_id FROM counties
             WHERE city_id = ?1 ORDER BY id",
            [city_id],
        )
        .await?;

    let mut counties = Vec::new();
    while let Some(row) = rows.next().await? {
        counties.push(row_to_county(&row)?);
    }
    Ok(counties)
}
