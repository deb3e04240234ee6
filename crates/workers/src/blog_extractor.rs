use chrono::Utc;
use lakescraper_core::{BlogUrlMetadata, DataType, ScrapedData};
use lakescraper_parser::Document;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: extracts blog URLs and article links from blog landing pages,
/// via the job's resolved template (§4.7) rather than a fixed selector set.
/// Ported from `src/workers/blog_extractor.py`.
pub struct BlogExtractor {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for BlogExtractor {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        if urls.is_empty() {
            info!(domain = %self.base.domain, "no_blog_urls_to_process");
            return Vec::new();
        }

        let mut results = Vec::new();
        for url in urls {
            let fetch_result = self.base.fetch_page(url).await;
            if fetch_result.blocked || fetch_result.captcha {
                warn!(url, "blocked");
                continue;
            }

            let Some(doc) = Document::parse(&fetch_result.body, url) else {
                error!(url, "blog_extract_error: unparseable document");
                continue;
            };

            let article_urls = self.base.template.extract_blog_urls(&fetch_result.body, url);
            let metadata = BlogUrlMetadata {
                landing_url: url.clone(),
                total_articles: article_urls.len(),
                article_urls,
            };

            let record = ScrapedData {
                id: Uuid::new_v4(),
                job_id: self.base.job_id,
                domain: self.base.domain.clone(),
                data_type: DataType::BlogUrl,
                url: Some(url.clone()),
                title: doc.extract_title(),
                published_date: None,
                metadata: serde_json::to_value(&metadata).unwrap_or_default(),
                scraped_at: Utc::now(),
            };
            self.base.export_results(std::slice::from_ref(&record)).await;
            results.push(record);
        }

        info!(domain = %self.base.domain, count = results.len(), "blogs_extracted");
        results
    }
}
