//! Entity structs for the province → city → county hierarchy.
//!
//! Each persisted entity maps to a table in the region store. The `New*`
//! variants are the shapes produced by the parser before the store assigns
//! an id.

mod city;
mod county;
mod province;

pub use city::{City, NewCity};
pub use county::{County, NewCounty};
pub use province::{NewProvince, Province};
