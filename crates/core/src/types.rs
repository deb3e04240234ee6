use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// One of the three transport strategies, ascending in capability and cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    BasicHttp,
    HeadlessBrowser,
    HeadlessProxy,
}

impl Tier {
    pub const CHAIN: [Tier; 3] = [Tier::BasicHttp, Tier::HeadlessBrowser, Tier::HeadlessProxy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::BasicHttp => "basic_http",
            Tier::HeadlessBrowser => "headless_browser",
            Tier::HeadlessProxy => "headless_proxy",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Tier> {
        match s {
            "basic_http" => Some(Tier::BasicHttp),
            "headless_browser" => Some(Tier::HeadlessBrowser),
            "headless_proxy" => Some(Tier::HeadlessProxy),
            _ => None,
        }
    }

    /// Fixed per-tier cost in USD, per §4.1.
    pub fn cost_usd(&self) -> f64 {
        match self {
            Tier::BasicHttp => 0.0001,
            Tier::HeadlessBrowser => 0.002,
            Tier::HeadlessProxy => 0.004,
        }
    }

    /// The next tier in the escalation chain, or `None` at the top.
    pub fn next(&self) -> Option<Tier> {
        let idx = Tier::CHAIN.iter().position(|t| t == self)?;
        Tier::CHAIN.get(idx + 1).copied()
    }
}

/// Options passed to a fetcher for a single request.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub headers: HashMap<String, String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
        }
    }
}

/// Transient result of a single fetch. Never persisted directly.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
    pub tier_used: Tier,
    pub cost_usd: f64,
    pub duration_ms: u64,
    pub blocked: bool,
    pub captcha: bool,
}

impl FetchResult {
    /// §4.3 escalate condition.
    pub fn should_escalate(&self) -> bool {
        self.blocked
            || self.captcha
            || matches!(self.status, 403 | 429 | 503)
            || (self.status == 200 && self.body.len() < 200)
    }
}

/// Semantic category of a persisted extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    BlogUrl,
    Article,
    Contact,
    TechStack,
    Resource,
    Pricing,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::BlogUrl => "blog_url",
            DataType::Article => "article",
            DataType::Contact => "contact",
            DataType::TechStack => "tech_stack",
            DataType::Resource => "resource",
            DataType::Pricing => "pricing",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<DataType> {
        match s {
            "blog_url" => Some(DataType::BlogUrl),
            "article" => Some(DataType::Article),
            "contact" => Some(DataType::Contact),
            "tech_stack" => Some(DataType::TechStack),
            "resource" => Some(DataType::Resource),
            "pricing" => Some(DataType::Pricing),
            _ => None,
        }
    }
}

/// A URL classified by the domain mapper, with the classifier's confidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedUrl {
    pub url: String,
    pub data_type: DataType,
    pub confidence: f64,
}

/// Lifecycle status of a `ScrapeJob`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub id: Uuid,
    pub domain: String,
    pub template_id: String,
    pub status: JobStatus,
    pub strategy_used: Option<String>,
    pub error_message: Option<String>,
    pub cost_usd: f64,
    pub duration_ms: u64,
    pub pages_scraped: i64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedData {
    pub id: Uuid,
    pub job_id: Uuid,
    pub domain: String,
    pub data_type: DataType,
    pub url: Option<String>,
    pub title: Option<String>,
    pub published_date: Option<DateTime<Utc>>,
    pub metadata: JsonValue,
    pub scraped_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainMetadata {
    pub domain: String,
    pub last_successful_strategy: Option<String>,
    pub block_count: i64,
    pub last_scraped_at: Option<DateTime<Utc>>,
    pub success_rate: f64,
    pub avg_cost_usd: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeFrequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl ScrapeFrequency {
    pub fn delta(&self) -> chrono::Duration {
        match self {
            ScrapeFrequency::Daily => chrono::Duration::days(1),
            ScrapeFrequency::Weekly => chrono::Duration::days(7),
            ScrapeFrequency::Biweekly => chrono::Duration::days(14),
            ScrapeFrequency::Monthly => chrono::Duration::days(30),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDomain {
    pub domain: String,
    pub data_types: Vec<DataType>,
    pub scrape_frequency: ScrapeFrequency,
    pub max_pages: i32,
    pub template_id: String,
    pub webhook_url: Option<String>,
    pub is_active: bool,
    pub last_auto_scraped_at: Option<DateTime<Utc>>,
    pub next_scrape_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStatus {
    Searching,
    Scraping,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryJob {
    pub id: Uuid,
    pub query: String,
    pub search_pages: i32,
    pub results_per_page: i32,
    pub data_types: Vec<DataType>,
    pub template_id: String,
    pub max_pages_per_domain: i32,
    pub status: DiscoveryStatus,
    pub domains_found: i32,
    pub domains_skipped: i32,
    pub cost_usd: f64,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryJobDomain {
    pub id: Uuid,
    pub discovery_job_id: Uuid,
    pub domain: String,
    pub source_url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub score: f64,
    pub status: String,
    pub skip_reason: Option<String>,
    pub scrape_job_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedSearch {
    pub id: Uuid,
    pub query: String,
    pub search_pages: i32,
    pub results_per_page: i32,
    pub data_types: Vec<DataType>,
    pub max_pages_per_domain: i32,
    pub scrape_frequency: ScrapeFrequency,
    pub is_active: bool,
    pub last_run_at: Option<DateTime<Utc>>,
    pub next_run_at: DateTime<Utc>,
}

/// §4.9 typed attribute-bag shapes. Each is serialized into `ScrapedData.metadata`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogUrlMetadata {
    pub landing_url: String,
    pub article_urls: Vec<String>,
    pub total_articles: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleMetadata {
    pub author: Option<String>,
    pub categories: Vec<String>,
    pub word_count: usize,
    pub excerpt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMetadata {
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechStackMetadata {
    pub platform: Option<String>,
    pub analytics: Vec<String>,
    pub marketing_tools: Vec<String>,
    pub frameworks: Vec<String>,
    pub cdn: Vec<String>,
    pub js_libraries: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetadata {
    pub resource_type: String,
    pub is_gated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingMetadata {
    pub plan_name: Option<String>,
    pub price: Option<String>,
    pub billing_cycle: String,
    pub features: Vec<String>,
    pub has_free_trial: bool,
    pub cta_text: Option<String>,
}

/// A single search result, as returned by an external `SearchProvider`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub url: String,
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub score: f64,
}
