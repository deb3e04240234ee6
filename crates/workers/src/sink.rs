use async_trait::async_trait;
use lakescraper_core::ScrapedData;

/// Persistence boundary for worker output. Implemented by the storage crate;
/// defined here so workers never depend on storage directly (mirrors the
/// orchestrator/fetcher split — see escalation policy placement).
#[async_trait]
pub trait ScrapedDataSink: Send + Sync {
    async fn insert_batch(&self, records: &[ScrapedData]) -> anyhow::Result<usize>;
}

/// No-op sink for tests and dry runs.
pub struct NullSink;

#[async_trait]
impl ScrapedDataSink for NullSink {
    async fn insert_batch(&self, records: &[ScrapedData]) -> anyhow::Result<usize> {
        Ok(records.len())
    }
}
