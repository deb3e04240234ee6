mod discovery;
mod domains;
mod jobs;
mod scraped_data;
mod tracked_domains;
mod tracked_search;

use anyhow::Result;
use async_trait::async_trait;
use lakescraper_core::{
    DataType, DiscoveryJob, DiscoveryJobDomain, DiscoveryStatus, DomainMetadata, EngineError,
    JobStatus, ScrapeFrequency, ScrapeJob, ScrapedData, TrackedDomain, TrackedSearch,
};
use lakescraper_workers::ScrapedDataSink;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct Storage {
    pool: PgPool,
}

impl Storage {
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(EngineError::Storage)?;
        info!(max_connections, "connected to postgres");
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::raw_sql(include_str!("../migrations/001_init.sql"))
            .execute(&self.pool)
            .await
            .map_err(EngineError::Storage)?;
        info!("migrations complete");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn create_job(&self, domain: &str, template_id: &str) -> Result<ScrapeJob> {
        jobs::create_job(&self.pool, domain, template_id).await
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<Option<ScrapeJob>> {
        jobs::get_job(&self.pool, job_id).await
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_job_status(
        &self,
        job_id: Uuid,
        status: JobStatus,
        strategy_used: Option<&str>,
        error_message: Option<&str>,
        cost_usd: Option<f64>,
        duration_ms: Option<i64>,
        pages_scraped: Option<i64>,
        completed: bool,
    ) -> Result<bool> {
        jobs::update_job_status(
            &self.pool,
            job_id,
            status,
            strategy_used,
            error_message,
            cost_usd,
            duration_ms,
            pages_scraped,
            completed,
        )
        .await
    }

    pub async fn list_jobs(&self, domain: Option<&str>, limit: i64) -> Result<Vec<ScrapeJob>> {
        jobs::list_jobs(&self.pool, domain, limit).await
    }

    pub async fn get_scraped_data_by_job(&self, job_id: Uuid) -> Result<Vec<ScrapedData>> {
        scraped_data::get_scraped_data_by_job(&self.pool, job_id).await
    }

    pub async fn get_domain_metadata(&self, domain: &str) -> Result<Option<DomainMetadata>> {
        domains::get_domain_metadata(&self.pool, domain).await
    }

    pub async fn upsert_domain_metadata(
        &self,
        domain: &str,
        last_successful_strategy: Option<&str>,
        block_count_increment: i64,
        success_rate: Option<f64>,
        avg_cost_usd: Option<f64>,
    ) -> Result<()> {
        domains::upsert_domain_metadata(
            &self.pool,
            domain,
            last_successful_strategy,
            block_count_increment,
            success_rate,
            avg_cost_usd,
        )
        .await
    }

    pub async fn upsert_tracked_domain(&self, domain: &TrackedDomain) -> Result<()> {
        tracked_domains::upsert_tracked_domain(&self.pool, domain).await
    }

    pub async fn get_tracked_domain(&self, domain: &str) -> Result<Option<TrackedDomain>> {
        tracked_domains::get_tracked_domain(&self.pool, domain).await
    }

    pub async fn get_due_domains(&self) -> Result<Vec<TrackedDomain>> {
        tracked_domains::get_due_domains(&self.pool).await
    }

    pub async fn mark_scraped(&self, domain: &str, frequency: ScrapeFrequency) -> Result<()> {
        tracked_domains::mark_scraped(&self.pool, domain, frequency).await
    }

    pub async fn create_discovery_job(
        &self,
        query: &str,
        search_pages: i32,
        results_per_page: i32,
        data_types: &[DataType],
        max_pages_per_domain: i32,
    ) -> Result<DiscoveryJob> {
        discovery::create_discovery_job(
            &self.pool,
            query,
            search_pages,
            results_per_page,
            data_types,
            max_pages_per_domain,
        )
        .await
    }

    pub async fn update_discovery_status(&self, id: Uuid, status: DiscoveryStatus, completed: bool) -> Result<()> {
        discovery::update_discovery_status(&self.pool, id, status, completed).await
    }

    pub async fn insert_discovery_domain(&self, row: &DiscoveryJobDomain) -> Result<()> {
        discovery::insert_discovery_domain(&self.pool, row).await
    }

    pub async fn get_due_searches(&self) -> Result<Vec<TrackedSearch>> {
        tracked_search::get_due_searches(&self.pool).await
    }

    pub async fn mark_search_run(&self, id: Uuid, frequency: ScrapeFrequency) -> Result<()> {
        tracked_search::mark_search_run(&self.pool, id, frequency).await
    }
}

#[async_trait]
impl ScrapedDataSink for Storage {
    async fn insert_batch(&self, records: &[ScrapedData]) -> Result<usize> {
        scraped_data::batch_insert_scraped_data(&self.pool, records).await
    }
}
