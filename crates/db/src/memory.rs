use async_trait::async_trait;
use autolist_core::automation::Automation;
use autolist_core::error::SourceError;
use autolist_core::pipeline::RecordSource;

/// A fixed, in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<Automation>,
}

impl MemorySource {
    pub fn new(records: Vec<Automation>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn list(&self) -> Result<Vec<Automation>, SourceError> {
        Ok(self.records.clone())
    }
}
