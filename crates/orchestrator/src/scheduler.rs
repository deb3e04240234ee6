use std::time::Duration;

use lakescraper_storage::Storage;
use tracing::{error, info};

use crate::queue::JobQueue;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(3600);

/// §4.12 scheduler: ported from `src/workers/scheduled_scraper.py`'s
/// `check_scheduled_scrapes` task, run here as a periodic tick rather than a
/// cron-triggered queue job.
pub async fn run(storage: Storage, queue: JobQueue, tick_interval: Duration) {
    let mut interval = tokio::time::interval(tick_interval);
    loop {
        interval.tick().await;
        if let Err(e) = tick(&storage, &queue).await {
            error!(error = %e, "scheduler_tick_failed");
        }
    }
}

async fn tick(storage: &Storage, queue: &JobQueue) -> anyhow::Result<()> {
    let due = storage.get_due_domains().await?;
    info!(count = due.len(), "scheduler_tick");

    for tracked in due {
        let job = match storage.create_job(&tracked.domain, &tracked.template_id).await {
            Ok(job) => job,
            Err(e) => {
                error!(domain = %tracked.domain, error = %e, "scheduler_create_job_failed");
                continue;
            }
        };
        let input = crate::job::JobInput {
            job_id: job.id,
            domain: tracked.domain.clone(),
            template_id: tracked.template_id.clone(),
            max_pages: tracked.max_pages,
            data_types: tracked.data_types.clone(),
        };
        if queue.enqueue(input).await.is_err() {
            error!(domain = %tracked.domain, "scheduler_enqueue_failed: queue closed");
            continue;
        }
        if let Err(e) = storage.mark_scraped(&tracked.domain, tracked.scrape_frequency).await {
            error!(domain = %tracked.domain, error = %e, "scheduler_mark_scraped_failed");
        }
    }
    Ok(())
}
