//! Runtime layer for liftboard.
//!
//! Owns snapshot publication and the periodic re-ingestion loop that keeps a
//! long-running process's report current.

pub mod data_manager;
pub mod orchestrator;
pub mod snapshot;

pub use lift_core as core;
pub use lift_data as data;
