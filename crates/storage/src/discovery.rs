use anyhow::Result;
use lakescraper_core::{DataType, DiscoveryJob, DiscoveryJobDomain, DiscoveryStatus, EngineError};
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn status_str(s: DiscoveryStatus) -> &'static str {
    match s {
        DiscoveryStatus::Searching => "searching",
        DiscoveryStatus::Scraping => "scraping",
        DiscoveryStatus::Completed => "completed",
        DiscoveryStatus::Failed => "failed",
    }
}

fn parse_status(s: &str) -> DiscoveryStatus {
    match s {
        "scraping" => DiscoveryStatus::Scraping,
        "completed" => DiscoveryStatus::Completed,
        "failed" => DiscoveryStatus::Failed,
        _ => DiscoveryStatus::Searching,
    }
}

fn row_to_job(row: &sqlx::postgres::PgRow) -> Result<DiscoveryJob> {
    let data_types: Vec<String> = row.try_get("data_types")?;
    Ok(DiscoveryJob {
        id: row.try_get("id")?,
        query: row.try_get("query")?,
        search_pages: row.try_get("search_pages")?,
        results_per_page: row.try_get("results_per_page")?,
        data_types: data_types.iter().filter_map(|s| DataType::from_str_loose(s)).collect(),
        template_id: row.try_get::<Option<String>, _>("template_id")?.unwrap_or_else(|| "auto".to_string()),
        max_pages_per_domain: row.try_get("max_pages_per_domain")?,
        status: parse_status(row.try_get::<String, _>("status")?.as_str()),
        domains_found: row.try_get("domains_found")?,
        domains_skipped: row.try_get("domains_skipped")?,
        cost_usd: row.try_get("cost_usd")?,
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}

pub async fn create_discovery_job(
    pool: &PgPool,
    query: &str,
    search_pages: i32,
    results_per_page: i32,
    data_types: &[DataType],
    max_pages_per_domain: i32,
) -> Result<DiscoveryJob> {
    let dt: Vec<String> = data_types.iter().map(|d| d.as_str().to_string()).collect();
    let row = sqlx::query(
        "INSERT INTO discovery_jobs (id, query, search_pages, results_per_page, data_types, max_pages_per_domain, status)
         VALUES ($1, $2, $3, $4, $5, $6, 'searching') RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(query)
    .bind(search_pages)
    .bind(results_per_page)
    .bind(&dt)
    .bind(max_pages_per_domain)
    .fetch_one(pool)
    .await
    .map_err(EngineError::Storage)?;
    row_to_job(&row)
}

pub async fn update_discovery_status(pool: &PgPool, id: Uuid, status: DiscoveryStatus, completed: bool) -> Result<()> {
    sqlx::query(
        "UPDATE discovery_jobs SET status = $2, completed_at = CASE WHEN $3 THEN now() ELSE completed_at END WHERE id = $1",
    )
    .bind(id)
    .bind(status_str(status))
    .bind(completed)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}

pub async fn insert_discovery_domain(pool: &PgPool, row: &DiscoveryJobDomain) -> Result<()> {
    sqlx::query(
        "INSERT INTO discovery_job_domains (id, discovery_job_id, domain, source_url, title, snippet, score, status, skip_reason, scrape_job_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(row.id)
    .bind(row.discovery_job_id)
    .bind(&row.domain)
    .bind(&row.source_url)
    .bind(&row.title)
    .bind(&row.snippet)
    .bind(row.score)
    .bind(&row.status)
    .bind(&row.skip_reason)
    .bind(row.scrape_job_id)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}
