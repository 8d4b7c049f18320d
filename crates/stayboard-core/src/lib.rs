//! stayboard-core: hotel listing normalisation and dashboard aggregates.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! Loader ──► Normalizer ──► ListingTable ──► Filters ──► Stats ──► UI / report
//!              │
//!              └── Field parsers
//! ```
//!
//! Everything is synchronous and runs on the caller's thread. Parsing never
//! fails; only reading the dataset file can.

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod parse;
pub mod stats;
pub mod table;
pub mod types;

pub use error::LoadError;
pub use filter::{FilterSet, RatingRange};
pub use loader::load_path;
pub use table::ListingTable;
pub use types::{Listing, NumericColumn};
