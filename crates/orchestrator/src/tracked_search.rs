use std::sync::Arc;
use std::time::Duration;

use lakescraper_search::SearchProvider;
use lakescraper_storage::Storage;
use tracing::{error, info};

use crate::discovery::{run_discovery, DiscoveryConfig};
use crate::queue::JobQueue;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Default template for domains discovered through a tracked search: there is
/// no per-search template column, so every discovered domain is mapped with
/// the generic auto-detection template (§4.5/§4.7).
const AUTO_TEMPLATE_ID: &str = "auto";

/// §4.12 tracked searches: analogous to the tracked-domain scheduler, but the
/// unit dispatched per tick is a `DiscoveryJob` rather than a single scrape.
pub async fn run(storage: Storage, search: Arc<dyn SearchProvider>, queue: JobQueue, tick_interval: Duration) {
    let mut interval = tokio::time::interval(tick_interval);
    loop {
        interval.tick().await;
        if let Err(e) = tick(&storage, search.as_ref(), &queue).await {
            error!(error = %e, "tracked_search_tick_failed");
        }
    }
}

async fn tick(storage: &Storage, search: &dyn SearchProvider, queue: &JobQueue) -> anyhow::Result<()> {
    let due = storage.get_due_searches().await?;
    info!(count = due.len(), "tracked_search_tick");

    let config = DiscoveryConfig::default();
    for tracked in due {
        let job = match storage
            .create_discovery_job(
                &tracked.query,
                tracked.search_pages,
                tracked.results_per_page,
                &tracked.data_types,
                tracked.max_pages_per_domain,
            )
            .await
        {
            Ok(job) => job,
            Err(e) => {
                error!(query = %tracked.query, error = %e, "tracked_search_create_discovery_job_failed");
                continue;
            }
        };

        if let Err(e) = run_discovery(
            storage,
            search,
            queue,
            &config,
            job.id,
            &tracked.query,
            tracked.search_pages as u32,
            AUTO_TEMPLATE_ID,
            tracked.max_pages_per_domain,
            &tracked.data_types,
        )
        .await
        {
            error!(query = %tracked.query, error = %e, "tracked_search_run_discovery_failed");
            continue;
        }

        if let Err(e) = storage.mark_search_run(tracked.id, tracked.scrape_frequency).await {
            error!(query = %tracked.query, error = %e, "tracked_search_mark_run_failed");
        }
    }
    Ok(())
}
