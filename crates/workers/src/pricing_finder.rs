use chrono::Utc;
use lakescraper_core::{DataType, ScrapedData};
use lakescraper_parser::{pricing::extract_pricing, Document};
use tracing::{error, info};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: one record per pricing plan. Ported from
/// `src/workers/pricing_finder.py`.
pub struct PricingFinder {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for PricingFinder {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        if urls.is_empty() {
            info!(domain = %self.base.domain, "no_pricing_urls");
            return Vec::new();
        }

        let mut results = Vec::new();
        for url in urls {
            let fetch_result = self.base.fetch_page(url).await;
            if fetch_result.blocked || fetch_result.captcha {
                continue;
            }

            let Some(doc) = Document::parse(&fetch_result.body, url) else {
                error!(url, "pricing_find_error: unparseable document");
                continue;
            };

            for plan in extract_pricing(&doc) {
                let record = ScrapedData {
                    id: Uuid::new_v4(),
                    job_id: self.base.job_id,
                    domain: self.base.domain.clone(),
                    data_type: DataType::Pricing,
                    url: Some(url.clone()),
                    title: plan.plan_name.clone(),
                    published_date: None,
                    metadata: serde_json::to_value(&plan).unwrap_or_default(),
                    scraped_at: Utc::now(),
                };
                self.base.export_results(std::slice::from_ref(&record)).await;
                results.push(record);
            }
        }

        info!(domain = %self.base.domain, count = results.len(), "pricing_found");
        results
    }
}
