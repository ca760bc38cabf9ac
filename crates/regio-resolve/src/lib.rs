//! # regio-resolve
//!
//! Cache-first resolution of the province → city → county hierarchy.
//!
//! - [`CacheFirstResolver`] serves a level from the store, and on a miss
//!   fetches, parses, persists, and re-reads it. Concurrent misses for the
//!   same parent share one fetch.
//! - [`Navigator`] drives the navigation state machine: resolves run on
//!   worker tasks and their results are applied only by the owner.

pub mod error;
pub mod flight;
pub mod navigator;
pub mod resolver;

#[cfg(test)]
mod test_support;

pub use error::{LOAD_FAILED, ResolveError};
pub use navigator::{NavEvent, Navigator, Step, Ticket};
pub use resolver::CacheFirstResolver;
