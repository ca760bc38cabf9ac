//! # regio-core
//!
//! Core types and contracts shared across all regio crates:
//! - Entity structs for the three-level hierarchy (province → city → county)
//! - Hierarchy levels and resolve requests
//! - Parsing of remote region payloads into entity shapes
//! - The `RegionStore` and `RegionSource` contracts plus an in-memory store
//! - The navigation state machine driven by user selection

pub mod entities;
pub mod errors;
pub mod level;
pub mod memory;
pub mod navigation;
pub mod parse;
pub mod request;
pub mod source;
pub mod store;

pub use errors::{NetworkError, ParseError, StoreError};
pub use level::Level;
pub use memory::MemoryRegionStore;
pub use navigation::{LevelView, NavError, NavState, NavigationStateMachine, Selection, Transition};
pub use request::{Listing, ResolveRequest};
pub use source::RegionSource;
pub use store::{BatchReport, RegionBatch, RegionStore};
