//! Shared domain types for the ACMI statistics tools.
//!
//! Holds the record and counter models, the error type, command-line
//! settings and the report formatter used by the data and binary crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
