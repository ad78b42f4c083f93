//! Core domain types and calculations for liftboard.
//!
//! Everything the ingestion, aggregation, and runtime layers share: canonical
//! record types, unit conversion, one-rep-max estimation, reference-zone time
//! handling, the error taxonomy, and CLI settings.

pub mod calculations;
pub mod error;
pub mod models;
pub mod settings;
pub mod time_utils;
