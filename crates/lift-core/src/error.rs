use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while ingesting workout exports.
///
/// Variants split along the recovery boundaries the loader observes:
/// [`IngestError::StorageDir`] is fatal to a run, everything else is fatal
/// only to the file that produced it.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The storage directory itself could not be listed.
    #[error("Failed to read storage directory {path}: {source}")]
    StorageDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user's export file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The header line did not match any supported export format.
    #[error("Unrecognized export format: {0:?}")]
    UnknownFormat(String),

    /// The CSV body was structurally invalid (ragged rows, bad quoting).
    #[error("Failed to read CSV body: {0}")]
    Csv(#[from] csv::Error),

    /// A row's timestamp did not match the expected pattern. Row indices
    /// count data rows from zero, header excluded.
    #[error("Invalid timestamp {value:?} at row {row}")]
    TimestampParse { row: usize, value: String },

    /// Raw I/O error without useful path context.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the liftboard crates.
pub type Result<T> = std::result::Result<T, IngestError>;
