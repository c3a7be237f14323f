//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading the course catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened or read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog contents are not valid CSV for the expected columns
    #[error("Malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}
