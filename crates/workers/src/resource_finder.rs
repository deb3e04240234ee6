use std::collections::HashSet;

use chrono::Utc;
use lakescraper_core::{DataType, ScrapedData};
use lakescraper_parser::{resource::extract_resources, Document};
use tracing::{error, info};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: discovers whitepapers, case studies, webinars and other resources,
/// deduped by URL across all input pages. Ported from
/// `src/workers/resource_finder.py`.
pub struct ResourceFinder {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for ResourceFinder {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        if urls.is_empty() {
            info!(domain = %self.base.domain, "no_resource_urls");
            return Vec::new();
        }

        let mut results = Vec::new();
        let mut seen = HashSet::new();

        for url in urls {
            let fetch_result = self.base.fetch_page(url).await;
            if fetch_result.blocked || fetch_result.captcha {
                continue;
            }

            let Some(doc) = Document::parse(&fetch_result.body, url) else {
                error!(url, "resource_find_error: unparseable document");
                continue;
            };

            for resource in extract_resources(&doc) {
                if !seen.insert(resource.url.clone()) {
                    continue;
                }
                let record = ScrapedData {
                    id: Uuid::new_v4(),
                    job_id: self.base.job_id,
                    domain: self.base.domain.clone(),
                    data_type: DataType::Resource,
                    url: Some(resource.url.clone()),
                    title: Some(resource.title.clone()),
                    published_date: None,
                    metadata: serde_json::to_value(&resource.metadata).unwrap_or_default(),
                    scraped_at: Utc::now(),
                };
                self.base.export_results(std::slice::from_ref(&record)).await;
                results.push(record);
            }
        }

        info!(domain = %self.base.domain, count = results.len(), "resources_found");
        results
    }
}
