use serde::{Deserialize, Serialize};

/// A persisted city belonging to a province.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct City {
    pub id: i64,
    pub name: String,
    /// Remote-assigned code used to address this city's counties.
    pub code: i64,
    pub province_id: i64,
}

/// A city parsed from a remote payload, stamped with its parent province id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCity {
    pub name: String,
    pub code: i64,
    pub province_id: i64,
}
