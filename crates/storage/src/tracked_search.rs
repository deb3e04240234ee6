use anyhow::Result;
use lakescraper_core::{DataType, EngineError, ScrapeFrequency, TrackedSearch};
use sqlx::{PgPool, Row};

fn parse_frequency(s: &str) -> ScrapeFrequency {
    match s {
        "daily" => ScrapeFrequency::Daily,
        "biweekly" => ScrapeFrequency::Biweekly,
        "monthly" => ScrapeFrequency::Monthly,
        _ => ScrapeFrequency::Weekly,
    }
}

fn row_to_search(row: &sqlx::postgres::PgRow) -> Result<TrackedSearch> {
    let data_types: Vec<String> = row.try_get("data_types")?;
    Ok(TrackedSearch {
        id: row.try_get("id")?,
        query: row.try_get("query")?,
        search_pages: row.try_get("search_pages")?,
        results_per_page: row.try_get("results_per_page")?,
        data_types: data_types.iter().filter_map(|s| DataType::from_str_loose(s)).collect(),
        max_pages_per_domain: row.try_get("max_pages_per_domain")?,
        scrape_frequency: parse_frequency(row.try_get::<String, _>("scrape_frequency")?.as_str()),
        is_active: row.try_get("is_active")?,
        last_run_at: row.try_get("last_run_at")?,
        next_run_at: row.try_get("next_run_at")?,
    })
}

/// §4.12 tracked-search tick: analogous to tracked domains, but the enqueued
/// unit is a DiscoveryJob.
pub async fn get_due_searches(pool: &PgPool) -> Result<Vec<TrackedSearch>> {
    let rows = sqlx::query("SELECT * FROM tracked_searches WHERE next_run_at <= now() AND is_active")
        .fetch_all(pool)
        .await
        .map_err(EngineError::Storage)?;
    rows.iter().map(row_to_search).collect()
}

pub async fn mark_search_run(pool: &PgPool, id: uuid::Uuid, frequency: ScrapeFrequency) -> Result<()> {
    let delta = frequency.delta();
    sqlx::query(
        "UPDATE tracked_searches SET last_run_at = now(), next_run_at = now() + $2::interval WHERE id = $1",
    )
    .bind(id)
    .bind(format!("{} seconds", delta.num_seconds()))
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;
    Ok(())
}
