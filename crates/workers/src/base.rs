use std::sync::Arc;

use lakescraper_core::{FetchOptions, FetchResult, ScrapedData};
use lakescraper_fetcher::Fetcher;
use lakescraper_templates::Template;
use tracing::warn;
use uuid::Uuid;

use crate::sink::ScrapedDataSink;

/// Shared worker state. §4.10: domain, job_id, bound logger (via `tracing`
/// spans at the call site), and the template (resolved once per job in
/// §4.11, either by `template_id` lookup or auto-detection) that
/// template-aware workers dispatch field extraction through.
pub struct WorkerBase {
    pub domain: String,
    pub job_id: Uuid,
    pub fetcher: Arc<dyn Fetcher>,
    pub sink: Arc<dyn ScrapedDataSink>,
    pub template: &'static dyn Template,
}

impl WorkerBase {
    pub fn new(
        domain: impl Into<String>,
        job_id: Uuid,
        fetcher: Arc<dyn Fetcher>,
        sink: Arc<dyn ScrapedDataSink>,
        template: &'static dyn Template,
    ) -> Self {
        Self {
            domain: domain.into(),
            job_id,
            fetcher,
            sink,
            template,
        }
    }

    /// §4.10: workers fetch with the tier-1 fetcher by default. Escalation
    /// across tiers is the orchestrator's job, not the worker's.
    pub async fn fetch_page(&self, url: &str) -> FetchResult {
        self.fetcher.fetch(url, &FetchOptions::default()).await
    }

    pub async fn export_results(&self, records: &[ScrapedData]) {
        if records.is_empty() {
            return;
        }
        if let Err(e) = self.sink.insert_batch(records).await {
            warn!(job_id = %self.job_id, error = %e, "export_results failed");
        }
    }
}
