//! Stop data error types.

use std::path::PathBuf;

use crate::domain::StopName;

/// A stop name that is not in the directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stop: {0}")]
pub struct UnknownStop(pub StopName);

/// Errors that can occur when reading or writing persisted stop data.
#[derive(Debug, thiserror::Error)]
pub enum StopError {
    /// Reading or writing a data file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A data file did not contain the expected JSON
    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
