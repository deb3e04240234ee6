use chrono::{DateTime, Utc};
use lakescraper_core::{ArticleMetadata, DataType, ScrapedData};
use lakescraper_parser::{article::extract_article, Document};
use tracing::{error, info};
use uuid::Uuid;

use crate::base::WorkerBase;
use crate::Worker;

/// §4.10: extracts metadata from individual article pages (consumes
/// `BlogExtractor`'s yield). Merges the job's template's field extraction
/// (title/author/date/word_count/excerpt) with the platform-agnostic
/// `categories` parser, since no template defines category extraction.
/// Ported from `src/workers/article_parser.py`.
pub struct ArticleParser {
    pub base: WorkerBase,
}

#[async_trait::async_trait]
impl Worker for ArticleParser {
    async fn execute(&self, urls: &[String]) -> Vec<ScrapedData> {
        if urls.is_empty() {
            info!(domain = %self.base.domain, "no_articles_to_parse");
            return Vec::new();
        }

        let mut results = Vec::new();
        for url in urls {
            let fetch_result = self.base.fetch_page(url).await;
            if fetch_result.blocked || fetch_result.captcha {
                continue;
            }

            let Some(doc) = Document::parse(&fetch_result.body, url) else {
                error!(url, "article_parse_error: unparseable document");
                continue;
            };

            let generic = extract_article(&doc);
            let template_article = self.base.template.extract_article(&fetch_result.body, url);

            let metadata = ArticleMetadata {
                author: template_article.author.or(generic.author),
                categories: generic.categories,
                word_count: template_article.word_count.unwrap_or(generic.word_count),
                excerpt: template_article.excerpt.or(generic.excerpt),
            };
            let published_date = template_article
                .date
                .as_deref()
                .and_then(parse_published_date);

            let record = ScrapedData {
                id: Uuid::new_v4(),
                job_id: self.base.job_id,
                domain: self.base.domain.clone(),
                data_type: DataType::Article,
                url: Some(url.clone()),
                title: template_article.title.or_else(|| doc.extract_title()),
                published_date,
                metadata: serde_json::to_value(&metadata).unwrap_or_default(),
                scraped_at: Utc::now(),
            };
            self.base.export_results(std::slice::from_ref(&record)).await;
            results.push(record);
        }

        info!(domain = %self.base.domain, count = results.len(), "articles_parsed");
        results
    }
}

/// Best-effort parse of a template's raw `date` string (format varies per
/// site) into a `DateTime<Utc>`. Unparseable input yields `None` rather than
/// failing the whole record.
fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    raw.parse::<chrono::NaiveDate>()
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}
