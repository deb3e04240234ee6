use anyhow::Result;
use lakescraper_core::{DataType, EngineError, ScrapedData};
use sqlx::{PgPool, Row};
use uuid::Uuid;

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<ScrapedData> {
    let data_type: String = row.try_get("data_type")?;
    Ok(ScrapedData {
        id: row.try_get("id")?,
        job_id: row.try_get("job_id")?,
        domain: row.try_get("domain")?,
        data_type: DataType::from_str_loose(&data_type)
            .ok_or_else(|| EngineError::Parse(format!("unknown data_type: {data_type}")))?,
        url: row.try_get("url")?,
        title: row.try_get("title")?,
        published_date: row.try_get("published_date")?,
        metadata: row.try_get("metadata")?,
        scraped_at: row.try_get("scraped_at")?,
    })
}

/// Batch insert, preserving caller order (§5 ordering guarantee: "batch
/// inserts preserve insertion order"). Grounded on the teacher's
/// UNNEST-based batch insert idiom.
pub async fn batch_insert_scraped_data(pool: &PgPool, records: &[ScrapedData]) -> Result<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();
    let job_ids: Vec<Uuid> = records.iter().map(|r| r.job_id).collect();
    let domains: Vec<String> = records.iter().map(|r| r.domain.clone()).collect();
    let data_types: Vec<String> = records.iter().map(|r| r.data_type.as_str().to_string()).collect();
    let urls: Vec<Option<String>> = records.iter().map(|r| r.url.clone()).collect();
    let titles: Vec<Option<String>> = records.iter().map(|r| r.title.clone()).collect();
    let metadata: Vec<serde_json::Value> = records.iter().map(|r| r.metadata.clone()).collect();
    let scraped_ats: Vec<chrono::DateTime<chrono::Utc>> = records.iter().map(|r| r.scraped_at).collect();

    sqlx::query(
        "INSERT INTO scraped_data (id, job_id, domain, data_type, url, title, metadata, scraped_at)
         SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::text[], $4::text[], $5::text[], $6::text[], $7::jsonb[], $8::timestamptz[])",
    )
    .bind(&ids)
    .bind(&job_ids)
    .bind(&domains)
    .bind(&data_types)
    .bind(&urls)
    .bind(&titles)
    .bind(&metadata)
    .bind(&scraped_ats)
    .execute(pool)
    .await
    .map_err(EngineError::Storage)?;

    Ok(records.len())
}

pub async fn get_scraped_data_by_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<ScrapedData>> {
    let rows = sqlx::query("SELECT * FROM scraped_data WHERE job_id = $1 ORDER BY scraped_at")
        .bind(job_id)
        .fetch_all(pool)
        .await
        .map_err(EngineError::Storage)?;
    rows.iter().map(row_to_record).collect()
}
