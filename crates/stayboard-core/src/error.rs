//! Error types for stayboard-core.
//!
//! Only dataset loading can fail. Field parsing never does: unparsable values
//! become missing values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Dataset loading failure. Fatal for the caller; nothing is retried.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed neither as one JSON document nor as JSON Lines.
    #[error("dataset {path} is not readable: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: RecordsError,
    },
}

/// Both decoding strategies failed; carries the reason from each.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a JSON document of records ({document}) and not JSON Lines ({lines})")]
pub struct RecordsError {
    pub document: String,
    pub lines: String,
}
