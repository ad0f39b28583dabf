//! Recording ingestion for the ACMI statistics tools.
//!
//! Responsible for reading TacView recordings (plain or zipped), decoding
//! their `key=value` lines, tracking objects and folding events into the
//! pilot and group tables.

pub mod aggregator;
pub mod analysis;
pub mod fields;
pub mod reader;
pub mod registry;

pub use acmi_core as core;
