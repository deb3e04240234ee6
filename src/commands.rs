use std::sync::Arc;

use anyhow::{anyhow, Result};
use lakescraper_core::config::AppConfig;
use lakescraper_core::DataType;
use lakescraper_orchestrator::discovery::{run_discovery, DiscoveryConfig};
use lakescraper_orchestrator::queue::JobQueue;
use lakescraper_orchestrator::{JobInput, JobRunner, JobRunnerConfig};
use lakescraper_search::StubSearchProvider;
use lakescraper_storage::Storage;
use tracing::info;

fn parse_data_types(raw: &[String]) -> Result<Vec<DataType>> {
    raw.iter()
        .map(|s| DataType::from_str_loose(s).ok_or_else(|| anyhow!("unknown data type: {s}")))
        .collect()
}

fn runner_config(config: &AppConfig) -> JobRunnerConfig {
    JobRunnerConfig {
        user_agent: config.general.user_agent.clone(),
        proxy_url: config.fetch.proxy_url.clone(),
        default_rate_limit_ms: config.rate_limit.default_rate_limit_ms,
        job_timeout: std::time::Duration::from_secs(config.general.job_timeout_secs),
    }
}

/// Submits one scrape job and runs it to completion in this process, mirroring
/// the teacher's synchronous `run_crawl` invocation rather than fire-and-forget.
pub async fn run_submit(storage: Storage, config: AppConfig, domain: String, template_id: String, max_pages: i32, data_types: Vec<String>) -> Result<()> {
    let data_types = parse_data_types(&data_types)?;
    let job = storage.create_job(&domain, &template_id).await?;
    info!(job_id = %job.id, domain = %domain, "job_submitted");

    let runner = JobRunner::new(storage.clone(), runner_config(&config));
    runner
        .run(JobInput {
            job_id: job.id,
            domain,
            template_id,
            max_pages,
            data_types,
        })
        .await;

    print_job(&storage, job.id).await
}

/// Runs a discovery query and its fanned-out child scrape jobs to completion.
#[allow(clippy::too_many_arguments)]
pub async fn run_discover(
    storage: Storage,
    config: AppConfig,
    query: String,
    search_pages: u32,
    data_types: Vec<String>,
    template_id: String,
    max_pages_per_domain: i32,
) -> Result<()> {
    let data_types = parse_data_types(&data_types)?;
    let search = StubSearchProvider::new();

    let discovery_job = storage
        .create_discovery_job(&query, search_pages as i32, 10, &data_types, max_pages_per_domain)
        .await?;

    let runner = Arc::new(JobRunner::new(storage.clone(), runner_config(&config)));
    let queue = JobQueue::spawn(runner, 256, config.general.max_concurrent_jobs);
    let discovery_config = DiscoveryConfig {
        recent_scrape_skip_days: config.general.recent_scrape_skip_days,
        max_domains_per_query: 50,
    };

    run_discovery(
        &storage,
        &search,
        &queue,
        &discovery_config,
        discovery_job.id,
        &query,
        search_pages,
        &template_id,
        max_pages_per_domain,
        &data_types,
    )
    .await?;

    println!("Discovery job {} dispatched; child jobs continue in the background of this process.", discovery_job.id);
    Ok(())
}

/// Daemon mode: runs the hourly scheduler and the 15-minute tracked-search
/// tick loop until interrupted, matching the teacher's ctrl_c-bound crawl loop.
pub async fn run_daemon(storage: Storage, config: AppConfig) -> Result<()> {
    let runner = Arc::new(JobRunner::new(storage.clone(), runner_config(&config)));
    let queue = JobQueue::spawn(runner, 256, config.general.max_concurrent_jobs);
    let search: Arc<dyn lakescraper_search::SearchProvider> = Arc::new(StubSearchProvider::new());

    let scheduler_storage = storage.clone();
    let scheduler_queue = queue.clone();
    let scheduler_interval = std::time::Duration::from_secs(config.scheduler.scheduler_tick_secs);
    tokio::spawn(lakescraper_orchestrator::scheduler::run(scheduler_storage, scheduler_queue, scheduler_interval));

    let tracked_search_interval = std::time::Duration::from_secs(config.scheduler.tracked_search_tick_secs);
    tokio::spawn(lakescraper_orchestrator::tracked_search::run(storage, search, queue, tracked_search_interval));

    info!("scheduler and tracked-search loops running; press ctrl-c to stop");
    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    Ok(())
}

pub async fn run_status(storage: Storage, limit: i64) -> Result<()> {
    let jobs = storage.list_jobs(None, limit).await?;
    println!("Recent jobs ({}):", jobs.len());
    for job in jobs {
        println!(
            "  {} [{:?}] {} cost=${:.4} pages={} dur={}ms",
            job.id, job.status, job.domain, job.cost_usd, job.pages_scraped, job.duration_ms
        );
    }

    let due_domains = storage.get_due_domains().await?;
    println!("\nTracked domains due now: {}", due_domains.len());

    let due_searches = storage.get_due_searches().await?;
    println!("Tracked searches due now: {}", due_searches.len());

    Ok(())
}

async fn print_job(storage: &Storage, job_id: uuid::Uuid) -> Result<()> {
    let job = storage.get_job(job_id).await?.ok_or_else(|| anyhow!("job {job_id} vanished"))?;
    println!(
        "job {} domain={} status={:?} strategy={:?} pages={} cost=${:.4} duration={}ms error={:?}",
        job.id, job.domain, job.status, job.strategy_used, job.pages_scraped, job.cost_usd, job.duration_ms, job.error_message
    );
    Ok(())
}
