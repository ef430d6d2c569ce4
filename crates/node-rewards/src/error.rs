//! Errors raised while loading a tier dataset
//!
//! The calculators themselves never fail; only reading the dataset can.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dataset loading
pub type Result<T> = std::result::Result<T, DataError>;

#[derive(Error, Debug)]
pub enum DataError {
    /// Dataset file could not be read
    #[error("Failed to read tier dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not a JSON array of tier rows
    #[error("Failed to parse tier dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Dataset parsed but has no rows
    #[error("Tier dataset contains no rows")]
    Empty,
}
