use lakescraper_storage::Storage;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

const WEBHOOK_TIMEOUT_SECS: u64 = 30;

/// §6 webhook export contract, ported from `export_job_to_webhook`. An empty
/// result set is a vacuous success: no request is made. A transport error or
/// non-2xx/3xx status is logged and returns `false`; it never affects job
/// status (§4.11 step 4, §7).
pub async fn export_job_to_webhook(storage: &Storage, job_id: Uuid, webhook_url: &str, trigger: &str) -> bool {
    let data = match storage.get_scraped_data_by_job(job_id).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(job_id = %job_id, error = %e, "webhook_export_load_failed");
            return false;
        }
    };

    if data.is_empty() {
        info!(job_id = %job_id, "webhook_export_skipped: no_data");
        return true;
    }

    let payload = json!({
        "source": "lake_b2b_scraper",
        "trigger": trigger,
        "job_id": job_id.to_string(),
        "count": data.len(),
        "data": data.iter().map(|item| json!({
            "id": item.id.to_string(),
            "domain": item.domain,
            "data_type": item.data_type.as_str(),
            "url": item.url,
            "title": item.title,
            "metadata": item.metadata,
            "scraped_at": item.scraped_at.to_rfc3339(),
        })).collect::<Vec<_>>(),
    });

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            error!(job_id = %job_id, error = %e, "webhook_client_build_failed");
            return false;
        }
    };

    match client
        .post(webhook_url)
        .header("User-Agent", "Lake-B2B-Scraper/1.0")
        .json(&payload)
        .send()
        .await
    {
        Ok(response) => {
            let success = response.status().as_u16() < 400;
            info!(job_id = %job_id, webhook_url, status = response.status().as_u16(), records = data.len(), success, "webhook_export_sent");
            success
        }
        Err(e) => {
            error!(job_id = %job_id, webhook_url, error = %e, "webhook_export_failed");
            false
        }
    }
}
