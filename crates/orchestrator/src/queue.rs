use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::info;

use crate::job::{JobInput, JobRunner};

/// §6 queue contract: job name `process_scrape_job`. Implemented as an
/// in-process bounded mpsc queue (ported from the teacher's
/// producer/worker-pool/storage-writer-task shape in `src/crawl.rs`) rather
/// than an external broker; a broker could be substituted later without
/// touching `JobRunner`.
#[derive(Clone)]
pub struct JobQueue {
    tx: mpsc::Sender<JobInput>,
}

impl JobQueue {
    /// Spawns the consumer loop: up to `max_concurrent_jobs` jobs run at once,
    /// each on its own task, bounded by a semaphore (§5 "parallel workers,
    /// each single-threaded internally").
    pub fn spawn(runner: Arc<JobRunner>, capacity: usize, max_concurrent_jobs: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<JobInput>(capacity);
        let semaphore = Arc::new(Semaphore::new(max_concurrent_jobs));

        tokio::spawn(async move {
            while let Some(input) = rx.recv().await {
                let runner = Arc::clone(&runner);
                let semaphore = Arc::clone(&semaphore);
                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await;
                    let job_id = input.job_id;
                    info!(job_id = %job_id, "job_dispatched");
                    runner.run(input).await;
                });
            }
        });

        Self { tx }
    }

    pub async fn enqueue(&self, input: JobInput) -> Result<(), mpsc::error::SendError<JobInput>> {
        self.tx.send(input).await
    }
}
