use chrono::Utc;
use lakescraper_core::{ContactMetadata, DataType, ScrapedData};
use lakescraper_parser::{
    contact::{dedupe_people, extract_people},
    Document,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: one record per deduped person found on team/about/contact pages.
/// Merges the generic multi-strategy parser with the job's template's own
/// team-card scan (richer on platforms with a matched selector set) and
/// re-dedupes the combined list. Ported from `src/workers/contact_finder.py`.
pub struct ContactFinder {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for ContactFinder {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        if urls.is_empty() {
            info!(domain = %self.base.domain, "no_contact_pages");
            return Vec::new();
        }

        let mut results = Vec::new();
        for url in urls {
            let fetch_result = self.base.fetch_page(url).await;
            if fetch_result.blocked || fetch_result.captcha {
                continue;
            }

            let Some(doc) = Document::parse(&fetch_result.body, url) else {
                error!(url, "contact_find_error: unparseable document");
                continue;
            };

            let mut people = extract_people(&doc, &fetch_result.body);
            people.extend(
                self.base
                    .template
                    .extract_contacts(&fetch_result.body, url)
                    .into_iter()
                    .map(|c| ContactMetadata {
                        full_name: c.full_name,
                        job_title: c.job_title,
                        email: c.email,
                        linkedin_url: c.linkedin_url,
                    }),
            );

            for person in dedupe_people(people) {
                let title = record_title(&person);
                let record = ScrapedData {
                    id: Uuid::new_v4(),
                    job_id: self.base.job_id,
                    domain: self.base.domain.clone(),
                    data_type: DataType::Contact,
                    url: Some(url.clone()),
                    title,
                    published_date: None,
                    metadata: serde_json::to_value(&person).unwrap_or_default(),
                    scraped_at: Utc::now(),
                };
                self.base.export_results(std::slice::from_ref(&record)).await;
                results.push(record);
            }
        }

        info!(domain = %self.base.domain, count = results.len(), "contacts_found");
        results
    }
}

fn record_title(person: &ContactMetadata) -> Option<String> {
    person.full_name.clone()
}
