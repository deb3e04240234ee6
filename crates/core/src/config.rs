use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
    pub rate_limit: RateLimitConfig,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
    #[serde(default = "default_max_pages_per_job")]
    pub max_pages_per_job: i32,
    #[serde(default = "default_job_timeout_secs")]
    pub job_timeout_secs: u64,
    #[serde(default = "default_recent_scrape_skip_days")]
    pub recent_scrape_skip_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub postgres_url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default)]
    pub proxy_url: Option<String>,
    #[serde(default = "default_tier_cost_basic")]
    pub tier_cost_basic_http: f64,
    #[serde(default = "default_tier_cost_browser")]
    pub tier_cost_headless_browser: f64,
    #[serde(default = "default_tier_cost_proxy")]
    pub tier_cost_headless_proxy: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_ms")]
    pub default_rate_limit_ms: u64,
    #[serde(default = "default_crawl_concurrency")]
    pub crawl_concurrency: usize,
    #[serde(default = "default_crawl_politeness_delay_ms")]
    pub crawl_politeness_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    #[serde(default = "default_scheduler_tick_secs")]
    pub scheduler_tick_secs: u64,
    #[serde(default = "default_tracked_search_tick_secs")]
    pub tracked_search_tick_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; LakeB2BScraper/1.0; +https://example.com/bot)".to_string()
}
fn default_max_concurrent_jobs() -> usize {
    10
}
fn default_max_pages_per_job() -> i32 {
    500
}
fn default_job_timeout_secs() -> u64 {
    300
}
fn default_recent_scrape_skip_days() -> i64 {
    7
}
fn default_pool_size() -> u32 {
    10
}
fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_tier_cost_basic() -> f64 {
    0.0001
}
fn default_tier_cost_browser() -> f64 {
    0.002
}
fn default_tier_cost_proxy() -> f64 {
    0.004
}
fn default_rate_limit_ms() -> u64 {
    1000
}
fn default_crawl_concurrency() -> usize {
    10
}
fn default_crawl_politeness_delay_ms() -> u64 {
    100
}
fn default_scheduler_tick_secs() -> u64 {
    3600
}
fn default_tracked_search_tick_secs() -> u64 {
    900
}
