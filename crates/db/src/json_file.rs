use std::path::{Path, PathBuf};

use async_trait::async_trait;
use autolist_core::automation::Automation;
use autolist_core::error::SourceError;
use autolist_core::pipeline::RecordSource;

use crate::error::DbError;

/// Reads automations from a JSON array on disk.
///
/// The file is read and parsed on every [`list`](RecordSource::list) call,
/// so edits to the snapshot show up on the next request.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the snapshot.
    pub async fn load(&self) -> Result<Vec<Automation>, DbError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DbError::Read {
                path: self.path.clone(),
                source,
            })?;

        let records: Vec<Automation> =
            serde_json::from_str(&raw).map_err(|source| DbError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "Loaded automations snapshot");
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn list(&self) -> Result<Vec<Automation>, SourceError> {
        self.load().await.map_err(|err| {
            tracing::error!(error = %err, "Automations snapshot unavailable");
            SourceError::from(err)
        })
    }
}

/// Verify the snapshot can be read and parsed.
pub async fn health_check(source: &JsonFileSource) -> Result<usize, DbError> {
    source.load().await.map(|records| records.len())
}
