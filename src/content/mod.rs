//! Content loading.
//!
//! Reads the hand-authored content tables from disk exactly once per
//! invocation and hands them to the catalog. Nothing in this crate writes
//! back to the tables; everything downstream is a pure derive pipeline.

pub mod load;
pub mod types;

pub use load::{ContentError, ContentTables, load_tables};
