use anyhow::Result;
use lakescraper_core::{DomainMetadata, EngineError};
use sqlx::{PgPool, Row};

fn row_to_meta(row: &sqlx::postgres::PgRow) -> Result<DomainMetadata> {
    Ok(DomainMetadata {
        domain: row.try_get("domain")?,
        last_successful_strategy: row.try_get("last_successful_strategy")?,
        block_count: row.try_get("block_count")?,
        last_scraped_at: row.try_get("last_scraped_at")?,
        success_rate: row.try_get::<Option<f64>, _>("success_rate")?.unwrap_or(0.0),
        avg_cost_usd: row.try_get::<Option<f64>, _>("avg_cost_usd")?.unwrap_or(0.0),
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn get_domain_metadata(pool: &PgPool, domain: &str) -> Result<Option<DomainMetadata>> {
    let row = sqlx::query("SELECT * FROM domain_metadata WHERE domain = $1")
        .bind(domain)
        .fetch_optional(pool)
        .await
        .map_err(EngineError::Storage)?;
    row.as_ref().map(row_to_meta).transpose()
}

/// §5: concurrent writers only ever mutate `domain_metadata` rows, and do so
/// through a field-by-field `COALESCE` upsert with server-side `now()`;
/// `block_count` is incremented server-side so concurrent updates commute.
pub async fn upsert_domain_metadata(
    pool: &PgPool,
    domain: &str,
    last_successful_strategy: Option<&str>,
    block_count_increment: i64,
    success_rate: Option<f64>,
    avg_cost_usd: Option<f64>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO domain_metadata (domain, last_successful_strategy, block_count, last_scraped_at, success_rate, avg_cost_usd)
         VALUES ($1, $2, $3, now(), $4, $5)
         ON CONFLICT (domain) DO UPDATE SET
            last_successful_strategy = COALESCE($2, domain_metadata.last_successful_strategy),
            block_count = domain_metadata.block_count + $3,
            last_scraped_at = now(),
            success_rate = COALESCE($4, domain_metadata.success_rate),
            avg_cost_usd = COALESCE($5, domain_metadata.avg_cost_usd),
            updated_at = now()",
    )
    .bind(domain)
    .bind(last_successful_strategy)
    .bind(block_count_increment)
    .bind(success_rate)
    .bind(avg_cost_usd)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}
