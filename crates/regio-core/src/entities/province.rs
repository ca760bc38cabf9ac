use serde::{Deserialize, Serialize};

/// A persisted province. Root of the hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Province {
    /// Store-assigned id, stable for the lifetime of the row.
    pub id: i64,
    pub name: String,
    /// Remote-assigned code used to address this province's cities.
    pub code: i64,
}

/// A province parsed from a remote payload, not yet persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProvince {
    pub name: String,
    pub code: i64,
}
