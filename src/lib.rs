//! stayboard: hotel listing normalizer and terminal dashboard.
//!
//! The binary loads one dataset, then either starts the TUI or prints a JSON
//! report of the same aggregates. This crate holds the pieces of that entry
//! point that integration tests drive directly.
//!
//! # Architecture
//!
//! ```text
//! dataset file ──► stayboard-core (load, normalize, filter, stats)
//!                        │
//!                        ├──► stayboard-tui   (interactive dashboard)
//!                        └──► report          (--summary JSON)
//! ```

pub mod cli;
pub mod report;
