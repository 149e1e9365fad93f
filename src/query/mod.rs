//! # Search Query Builder
//!
//! Turns optional search parameters into a predicate the store evaluates.
//! The builder never touches storage.

mod filter;
mod params;

pub use filter::{Criterion, StudentFilter};
pub use params::{build_filter, SearchParams};
