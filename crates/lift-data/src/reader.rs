//! Per-user export discovery and loading.
//!
//! The storage directory holds one export file per user; the file name is the
//! user identifier. Files are processed independently: one that cannot be
//! read, detected, or parsed is skipped with a warning and the rest of the
//! batch continues. Only the directory listing itself is fatal.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

use lift_core::error::{IngestError, Result};
use lift_core::models::LiftingSet;
use tracing::{debug, warn};

use crate::dialect::Dialect;
use crate::parser::parse_rows;

/// Load every user's export from `storage_dir`.
///
/// Returns a map from user identifier (file name) to that user's canonical
/// sets. Users whose file failed at any stage are absent; a user whose file
/// detected cleanly but held no data rows is present with an empty list.
pub fn load_user_sets(storage_dir: &Path) -> Result<HashMap<String, Vec<LiftingSet>>> {
    let entries = std::fs::read_dir(storage_dir).map_err(|source| IngestError::StorageDir {
        path: storage_dir.to_path_buf(),
        source,
    })?;

    let mut user_sets: HashMap<String, Vec<LiftingSet>> = HashMap::new();
    let mut files_seen = 0usize;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Failed to read an entry of {}: {}",
                    storage_dir.display(),
                    e
                );
                continue;
            }
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }

        files_seen += 1;
        let path = entry.path();
        let user = entry.file_name().to_string_lossy().into_owned();

        match load_single_file(&path) {
            Ok(sets) => {
                debug!("File {}: {} sets loaded", path.display(), sets.len());
                user_sets.insert(user, sets);
            }
            Err(e) => {
                warn!("Skipping file {}: {}", path.display(), e);
            }
        }
    }

    debug!(
        "Loaded {} of {} files from {}",
        user_sets.len(),
        files_seen,
        storage_dir.display()
    );

    Ok(user_sets)
}

/// Full pipeline for one export file: open, detect, re-read body, parse.
fn load_single_file(path: &Path) -> Result<Vec<LiftingSet>> {
    let file = File::open(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    // Detection consumes only the header line; the body is then re-read from
    // the top with the dialect's own delimiter.
    let mut header = String::new();
    reader.read_line(&mut header)?;
    let dialect = Dialect::detect(header.trim_end_matches(['\r', '\n']))?;

    reader.rewind()?;
    let mut body = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter())
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in body.records() {
        rows.push(record?);
    }

    let source = path.display().to_string();
    parse_rows(dialect, &source, &rows)
}
