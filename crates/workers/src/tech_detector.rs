use chrono::Utc;
use lakescraper_core::{DataType, ScrapedData};
use lakescraper_parser::tech::detect_tech_stack;
use tracing::{info, warn};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: homepage-only tech stack detection, always rooted at
/// `https://{domain}`. Ported from `src/workers/tech_detector.py`.
pub struct TechDetector {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for TechDetector {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        let Some(url) = urls.first() else {
            return Vec::new();
        };

        let fetch_result = self.base.fetch_page(url).await;
        if fetch_result.blocked || fetch_result.captcha {
            warn!(url, "blocked");
            return Vec::new();
        }

        let metadata = detect_tech_stack(&fetch_result.body, &fetch_result.headers);
        let record = ScrapedData {
            id: Uuid::new_v4(),
            job_id: self.base.job_id,
            domain: self.base.domain.clone(),
            data_type: DataType::TechStack,
            url: Some(url.clone()),
            title: Some(format!("Tech Stack: {}", self.base.domain)),
            published_date: None,
            metadata: serde_json::to_value(&metadata).unwrap_or_default(),
            scraped_at: Utc::now(),
        };
        self.base.export_results(std::slice::from_ref(&record)).await;

        info!(domain = %self.base.domain, "tech_stack_detected");
        vec![record]
    }
}
