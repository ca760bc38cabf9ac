use serde::{Deserialize, Serialize};

/// A persisted county belonging to a city.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct County {
    pub id: i64,
    pub name: String,
    /// Opaque identifier for downstream weather lookup.
    pub weather_id: String,
    pub city_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCounty {
    pub name: String,
    pub weather_id: String,
    pub city_id: i64,
}
