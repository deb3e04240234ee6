use anyhow::Result;
use lakescraper_core::{EngineError, JobStatus, ScrapeJob};
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn status_str(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Pending => "pending",
        JobStatus::Running => "running",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
}

fn parse_status(s: &str) -> JobStatus {
    match s {
        "running" => JobStatus::Running,
        "completed" => JobStatus::Completed,
        "failed" => JobStatus::Failed,
        _ => JobStatus::Pending,
    }
}

fn row_to_job(row: &sqlx::postgres::PgRow) -> Result<ScrapeJob> {
    Ok(ScrapeJob {
        id: row.try_get("id")?,
        domain: row.try_get("domain")?,
        template_id: row.try_get("template_id")?,
        status: parse_status(row.try_get::<String, _>("status")?.as_str()),
        strategy_used: row.try_get("strategy_used")?,
        error_message: row.try_get("error_message")?,
        cost_usd: row.try_get("cost_usd")?,
        duration_ms: row.try_get::<i64, _>("duration_ms")? as u64,
        pages_scraped: row.try_get("pages_scraped")?,
        created_at: row.try_get("created_at")?,
        completed_at: row.try_get("completed_at")?,
    })
}

pub async fn create_job(pool: &PgPool, domain: &str, template_id: &str) -> Result<ScrapeJob> {
    let row = sqlx::query(
        "INSERT INTO scrape_jobs (id, domain, template_id, status)
         VALUES ($1, $2, $3, 'pending') RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(domain)
    .bind(template_id)
    .fetch_one(pool)
    .await
    .map_err(EngineError::Storage)?;
    row_to_job(&row)
}

pub async fn get_job(pool: &PgPool, job_id: Uuid) -> Result<Option<ScrapeJob>> {
    let row = sqlx::query("SELECT * FROM scrape_jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
        .map_err(EngineError::Storage)?;
    row.as_ref().map(row_to_job).transpose()
}

/// §4.11 state transition: the `WHERE` clause refuses to touch a row that has
/// already reached a terminal status, so a late-arriving write (e.g. a job
/// timeout racing an in-flight completion) can never clobber it. Returns
/// `true` iff the row was actually updated.
#[allow(clippy::too_many_arguments)]
pub async fn update_job_status(
    pool: &PgPool,
    job_id: Uuid,
    status: JobStatus,
    strategy_used: Option<&str>,
    error_message: Option<&str>,
    cost_usd: Option<f64>,
    duration_ms: Option<i64>,
    pages_scraped: Option<i64>,
    completed: bool,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE scrape_jobs SET
            status = $2,
            strategy_used = COALESCE($3, strategy_used),
            error_message = COALESCE($4, error_message),
            cost_usd = COALESCE($5, cost_usd),
            duration_ms = COALESCE($6, duration_ms),
            pages_scraped = COALESCE($7, pages_scraped),
            completed_at = CASE WHEN $8 THEN now() ELSE completed_at END
         WHERE id = $1 AND status NOT IN ('completed', 'failed')",
    )
    .bind(job_id)
    .bind(status_str(status))
    .bind(strategy_used)
    .bind(error_message)
    .bind(cost_usd)
    .bind(duration_ms)
    .bind(pages_scraped)
    .bind(completed)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(result.rows_affected() > 0)
}

pub async fn list_jobs(pool: &PgPool, domain: Option<&str>, limit: i64) -> Result<Vec<ScrapeJob>> {
    let rows = sqlx::query(
        "SELECT * FROM scrape_jobs WHERE ($1::text IS NULL OR domain = $1)
         ORDER BY created_at DESC LIMIT $2",
    )
    .bind(domain)
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(EngineError::Storage)?;
    rows.iter().map(row_to_job).collect()
}
