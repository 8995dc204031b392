use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors raised by the data directory.
///
/// Only structural problems surface here (unreadable files, unparseable
/// JSON documents, required files that do not exist). Individual malformed
/// rows inside an otherwise valid file are dropped with a warning.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing required data file: {}", .0.display())]
    MissingFile(PathBuf),
}
