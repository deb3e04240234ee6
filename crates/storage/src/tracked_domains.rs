use anyhow::Result;
use lakescraper_core::{DataType, EngineError, ScrapeFrequency, TrackedDomain};
use sqlx::{PgPool, Row};

fn parse_frequency(s: &str) -> ScrapeFrequency {
    match s {
        "daily" => ScrapeFrequency::Daily,
        "biweekly" => ScrapeFrequency::Biweekly,
        "monthly" => ScrapeFrequency::Monthly,
        _ => ScrapeFrequency::Weekly,
    }
}

fn frequency_str(f: ScrapeFrequency) -> &'static str {
    match f {
        ScrapeFrequency::Daily => "daily",
        ScrapeFrequency::Weekly => "weekly",
        ScrapeFrequency::Biweekly => "biweekly",
        ScrapeFrequency::Monthly => "monthly",
    }
}

fn row_to_tracked(row: &sqlx::postgres::PgRow) -> Result<TrackedDomain> {
    let data_types: Vec<String> = row.try_get("data_types")?;
    Ok(TrackedDomain {
        domain: row.try_get("domain")?,
        data_types: data_types.iter().filter_map(|s| DataType::from_str_loose(s)).collect(),
        scrape_frequency: parse_frequency(row.try_get::<String, _>("scrape_frequency")?.as_str()),
        max_pages: row.try_get("max_pages")?,
        template_id: row.try_get("template_id")?,
        webhook_url: row.try_get("webhook_url")?,
        is_active: row.try_get("is_active")?,
        last_auto_scraped_at: row.try_get("last_auto_scraped_at")?,
        next_scrape_at: row.try_get("next_scrape_at")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn upsert_tracked_domain(pool: &PgPool, domain: &TrackedDomain) -> Result<()> {
    let data_types: Vec<String> = domain.data_types.iter().map(|d| d.as_str().to_string()).collect();
    sqlx::query(
        "INSERT INTO tracked_domains (domain, data_types, scrape_frequency, max_pages, template_id, webhook_url, is_active, next_scrape_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT (domain) DO UPDATE SET
            data_types = $2, scrape_frequency = $3, max_pages = $4, template_id = $5,
            webhook_url = $6, is_active = $7, next_scrape_at = $8, updated_at = now()",
    )
    .bind(&domain.domain)
    .bind(&data_types)
    .bind(frequency_str(domain.scrape_frequency))
    .bind(domain.max_pages)
    .bind(&domain.template_id)
    .bind(&domain.webhook_url)
    .bind(domain.is_active)
    .bind(domain.next_scrape_at)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}

pub async fn get_tracked_domain(pool: &PgPool, domain: &str) -> Result<Option<TrackedDomain>> {
    let row = sqlx::query("SELECT * FROM tracked_domains WHERE domain = $1")
        .bind(domain)
        .fetch_optional(pool)
        .await
        .map_err(EngineError::Storage)?;
    row.as_ref().map(row_to_tracked).transpose()
}

/// §4.12 scheduler tick: rows due for a scrape, `next_scrape_at <= now() AND is_active`.
pub async fn get_due_domains(pool: &PgPool) -> Result<Vec<TrackedDomain>> {
    let rows = sqlx::query("SELECT * FROM tracked_domains WHERE next_scrape_at <= now() AND is_active")
        .fetch_all(pool)
        .await
        .map_err(EngineError::Storage)?;
    rows.iter().map(row_to_tracked).collect()
}

pub async fn mark_scraped(pool: &PgPool, domain: &str, frequency: ScrapeFrequency) -> Result<()> {
    let delta = frequency.delta();
    sqlx::query(
        "UPDATE tracked_domains SET last_auto_scraped_at = now(), next_scrape_at = now() + $2::interval, updated_at = now()
         WHERE domain = $1",
    )
    .bind(domain)
    .bind(format!("{} seconds", delta.num_seconds()))
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}
