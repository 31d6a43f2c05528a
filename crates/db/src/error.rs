use std::path::PathBuf;

use autolist_core::error::SourceError;

/// Failures reading a record snapshot.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<DbError> for SourceError {
    fn from(err: DbError) -> Self {
        SourceError(err.to_string())
    }
}
