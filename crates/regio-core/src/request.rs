//! Resolve requests and the listings they produce.

use serde::{Deserialize, Serialize};

use crate::entities::{City, County, Province};
use crate::level::Level;

/// What the resolver is asked for: one level, scoped by its parent.
///
/// Store ids scope the local query; remote codes address the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum ResolveRequest {
    Provinces,
    Cities {
        province_id: i64,
        province_code: i64,
    },
    Counties {
        province_id: i64,
        province_code: i64,
        city_id: i64,
        city_code: i64,
    },
}

impl ResolveRequest {
    #[must_use]
    pub const fn cities_of(province: &Province) -> Self {
        Self::Cities {
            province_id: province.id,
            province_code: province.code,
        }
    }

    #[must_use]
    pub const fn counties_of(province: &Province, city: &City) -> Self {
        Self::Counties {
            province_id: province.id,
            province_code: province.code,
            city_id: city.id,
            city_code: city.code,
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::Provinces => Level::Province,
            Self::Cities { .. } => Level::City,
            Self::Counties { .. } => Level::County,
        }
    }

    /// Store id of the parent row the result is filtered by.
    #[must_use]
    pub const fn parent_id(&self) -> Option<i64> {
        match self {
            Self::Provinces => None,
            Self::Cities { province_id, .. } => Some(*province_id),
            Self::Counties { city_id, .. } => Some(*city_id),
        }
    }
}

/// Persisted rows for one level, as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", content = "rows", rename_all = "snake_case")]
pub enum Listing {
    Provinces(Vec<Province>),
    Cities(Vec<City>),
    Counties(Vec<County>),
}

impl Listing {
    #[must_use]
    pub const fn level(&self) -> Level {
        match self {
            Self::Provinces(_) => Level::Province,
            Self::Cities(_) => Level::City,
            Self::Counties(_) => Level::County,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Provinces(rows) => rows.len(),
            Self::Cities(rows) => rows.len(),
            Self::Counties(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn into_provinces(self) -> Option<Vec<Province>> {
        match self {
            Self::Provinces(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_cities(self) -> Option<Vec<City>> {
        match self {
            Self::Cities(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_counties(self) -> Option<Vec<County>> {
        match self {
            Self::Counties(rows) => Some(rows),
            _ => None,
        }
    }

    /// Display names in store order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        match self {
            Self::Provinces(rows) => rows.iter().map(|p| p.name.clone()).collect(),
            Self::Cities(rows) => rows.iter().map(|c| c.name.clone()).collect(),
            Self::Counties(rows) => rows.iter().map(|c| c.name.clone()).collect(),
        }
    }
}
