//! Ingestion and aggregation layer for liftboard.
//!
//! Detects export formats by header line, parses per-user workout files into
//! canonical sets, and rolls them up into per-exercise time series at every
//! supported granularity.

pub mod aggregator;
pub mod analysis;
pub mod dialect;
pub mod parser;
pub mod reader;

pub use lift_core as core;
