use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lakescraper_core::{BlogUrlMetadata, ClassifiedUrl, DataType, FetchOptions, JobStatus, Tier};
use lakescraper_storage::Storage;
use lakescraper_templates::{detect_template, get_template, Template};
use lakescraper_workers::sink::ScrapedDataSink;
use lakescraper_workers::{ArticleParser, BlogExtractor, ContactFinder, PricingFinder, ResourceFinder, TechDetector, Worker};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cost_tracker::CostTracker;
use crate::escalation::EscalationPolicy;
use crate::fetcher::EscalatingFetcher;
use crate::rate_limiter::RateLimiter;
use crate::state;
use crate::webhook::export_job_to_webhook;

/// Inputs for a single job run, mirroring `ScrapeJobInput` (§6).
pub struct JobInput {
    pub job_id: Uuid,
    pub domain: String,
    pub template_id: String,
    pub max_pages: i32,
    pub data_types: Vec<DataType>,
}

pub struct JobRunnerConfig {
    pub user_agent: String,
    pub proxy_url: Option<String>,
    pub default_rate_limit_ms: u64,
    pub job_timeout: Duration,
}

impl Default for JobRunnerConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; LakeB2BScraper/1.0)".to_string(),
            proxy_url: None,
            default_rate_limit_ms: 1000,
            job_timeout: Duration::from_secs(300),
        }
    }
}

/// §4.11: runs a single `ScrapeJob` end to end. Shared across every job the
/// queue dispatches; per-job state (fetcher, cost) is scoped inside `run`.
pub struct JobRunner {
    storage: Storage,
    escalation: Arc<EscalationPolicy>,
    rate_limiter: Arc<RateLimiter>,
    cost_tracker: Arc<CostTracker>,
    config: JobRunnerConfig,
}

impl JobRunner {
    pub fn new(storage: Storage, config: JobRunnerConfig) -> Self {
        let escalation = Arc::new(EscalationPolicy::new(storage.clone()));
        Self {
            storage,
            escalation,
            rate_limiter: Arc::new(RateLimiter::new(config.default_rate_limit_ms)),
            cost_tracker: Arc::new(CostTracker::new()),
            config,
        }
    }

    /// Public entry point used by the queue: enforces the job timeout and
    /// performs the FAILED transition for anything that escapes `run_inner`
    /// (§4.11 step 5, §7 "Orchestrator failure").
    pub async fn run(&self, input: JobInput) {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.config.job_timeout, self.run_inner(&input)).await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self.fail(&input, started, e.to_string()).await,
            Err(_) => self.fail(&input, started, format!("job timed out after {}s", self.config.job_timeout.as_secs())).await,
        }
    }

    /// Called when `run_inner` errors or the outer timeout fires. Looks up
    /// the job's actual persisted status first: if `run_inner` already
    /// reached Completed (e.g. it raced the timeout while awaiting webhook
    /// export), that status is terminal and must not be overwritten.
    async fn fail(&self, input: &JobInput, started: Instant, message: String) {
        error!(job_id = %input.job_id, domain = %input.domain, error = %message, "job_failed");

        let current = match self.storage.get_job(input.job_id).await {
            Ok(Some(job)) => job.status,
            Ok(None) => {
                warn!(job_id = %input.job_id, "fail: job not found, skipping status write");
                return;
            }
            Err(e) => {
                warn!(job_id = %input.job_id, error = %e, "fail: could not read current job status");
                return;
            }
        };

        if state::transition(current, JobStatus::Failed).is_err() {
            info!(job_id = %input.job_id, ?current, "fail: job already terminal, not overwriting");
            return;
        }

        match self
            .storage
            .update_job_status(
                input.job_id,
                JobStatus::Failed,
                None,
                Some(&message),
                Some(self.cost_tracker.get_job_cost(input.job_id)),
                Some(started.elapsed().as_millis() as i64),
                None,
                true,
            )
            .await
        {
            Ok(false) => info!(job_id = %input.job_id, "fail: status write skipped, job became terminal concurrently"),
            Ok(true) => {}
            Err(e) => warn!(job_id = %input.job_id, error = %e, "fail: status write failed"),
        }
    }

    async fn run_inner(&self, input: &JobInput) -> anyhow::Result<()> {
        let started = Instant::now();
        state::transition(JobStatus::Pending, JobStatus::Running)?;
        self.storage
            .update_job_status(input.job_id, JobStatus::Running, None, None, None, None, None, false)
            .await?;

        let template = self.resolve_template(input).await;
        let rate_limit_ms = template.config().rate_limit_ms;

        let fetcher = EscalatingFetcher::new(
            input.job_id,
            input.domain.clone(),
            self.config.user_agent.clone(),
            self.config.proxy_url.clone(),
            Arc::clone(&self.escalation),
            Arc::clone(&self.rate_limiter),
            Arc::clone(&self.cost_tracker),
            rate_limit_ms,
        )?;

        let classified = lakescraper_mapper::map_domain(&input.domain, input.max_pages as usize, &fetcher).await;
        let total_data = classified.len();
        let by_type = group_by_type(&classified);

        let fetcher: Arc<dyn lakescraper_fetcher::Fetcher> = Arc::new(fetcher);
        let mut errors: Vec<String> = Vec::new();
        let sink: Arc<dyn ScrapedDataSink> = Arc::new(self.storage.clone());

        let blog_urls = by_type.get(&DataType::BlogUrl).cloned().unwrap_or_default();
        let wants_blog = input.data_types.contains(&DataType::BlogUrl);
        let wants_article = input.data_types.contains(&DataType::Article);

        let mut article_urls: Vec<String> = Vec::new();
        if wants_blog || wants_article {
            let worker = BlogExtractor {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            match run_catching(&worker, &blog_urls).await {
                Ok(records) => {
                    for record in &records {
                        if let Ok(meta) = serde_json::from_value::<BlogUrlMetadata>(record.metadata.clone()) {
                            article_urls.extend(meta.article_urls);
                        }
                    }
                }
                Err(e) => errors.push(format!("blog_extractor: {e}")),
            }
        }

        if wants_article {
            article_urls.sort();
            article_urls.dedup();
            let worker = ArticleParser {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            if let Err(e) = run_catching(&worker, &article_urls).await {
                errors.push(format!("article_parser: {e}"));
            }
        }

        if input.data_types.contains(&DataType::Contact) {
            let urls = by_type.get(&DataType::Contact).cloned().unwrap_or_default();
            let worker = ContactFinder {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            if let Err(e) = run_catching(&worker, &urls).await {
                errors.push(format!("contact_finder: {e}"));
            }
        }

        if input.data_types.contains(&DataType::TechStack) {
            let root = vec![format!("https://{}", input.domain)];
            let worker = TechDetector {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            if let Err(e) = run_catching(&worker, &root).await {
                errors.push(format!("tech_detector: {e}"));
            }
        }

        if input.data_types.contains(&DataType::Resource) {
            let urls = by_type.get(&DataType::Resource).cloned().unwrap_or_default();
            let worker = ResourceFinder {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            if let Err(e) = run_catching(&worker, &urls).await {
                errors.push(format!("resource_finder: {e}"));
            }
        }

        if input.data_types.contains(&DataType::Pricing) {
            let urls = by_type.get(&DataType::Pricing).cloned().unwrap_or_default();
            let worker = PricingFinder {
                base: lakescraper_workers::base::WorkerBase::new(
                    input.domain.clone(),
                    input.job_id,
                    Arc::clone(&fetcher),
                    Arc::clone(&sink),
                    template,
                ),
            };
            if let Err(e) = run_catching(&worker, &urls).await {
                errors.push(format!("pricing_finder: {e}"));
            }
        }

        for err in &errors {
            warn!(job_id = %input.job_id, %err, "worker_error_recorded");
        }

        let cost_usd = self.cost_tracker.get_job_cost(input.job_id);
        let duration_ms = started.elapsed().as_millis() as i64;
        let strategy_used = self.storage.get_domain_metadata(&input.domain).await?.and_then(|m| m.last_successful_strategy);
        let error_message = (!errors.is_empty()).then(|| errors.join("; "));

        state::transition(JobStatus::Running, JobStatus::Completed)?;
        self.storage
            .update_job_status(
                input.job_id,
                JobStatus::Completed,
                strategy_used.as_deref(),
                error_message.as_deref(),
                Some(cost_usd),
                Some(duration_ms),
                Some(total_data as i64),
                true,
            )
            .await?;

        if let Some(tracked) = self.storage.get_tracked_domain(&input.domain).await? {
            if let Some(webhook_url) = tracked.webhook_url {
                let delivered = export_job_to_webhook(&self.storage, input.job_id, &webhook_url, "scheduled").await;
                if !delivered {
                    warn!(job_id = %input.job_id, "webhook_delivery_failed");
                }
            }
        }

        Ok(())
    }

    /// §6: `template_id` is optional. An explicit, registered id is used as-is;
    /// anything else ("auto", empty, or an unknown id) falls back to fetching
    /// the homepage and running §4.7 platform auto-detection against it.
    async fn resolve_template(&self, input: &JobInput) -> &'static dyn Template {
        if let Some(template) = get_template(&input.template_id) {
            return template;
        }

        let root = format!("https://{}", input.domain);
        let probe = match lakescraper_fetcher::build_fetcher(Tier::BasicHttp, self.config.user_agent.clone(), None) {
            Ok(probe) => probe,
            Err(e) => {
                warn!(domain = %input.domain, error = %e, "resolve_template: could not build probe fetcher, defaulting to generic");
                return get_template("generic").expect("generic template always registered");
            }
        };
        let result = lakescraper_fetcher::Fetcher::fetch(probe.as_ref(), &root, &FetchOptions::default()).await;
        detect_template(&result.body, &root)
    }
}

fn group_by_type(classified: &[ClassifiedUrl]) -> HashMap<DataType, Vec<String>> {
    let mut map: HashMap<DataType, Vec<String>> = HashMap::new();
    for entry in classified {
        map.entry(entry.data_type).or_default().push(entry.url.clone());
    }
    map
}

/// A worker's `execute` never returns a `Result`; a panic inside it is still
/// caught one layer up in the real deployment via the queue's task boundary.
/// Kept as a thin seam so job.rs reads like the two-layer error model in
/// §4.11/§9 even though today it cannot itself fail.
async fn run_catching<W>(worker: &W, urls: &[String]) -> anyhow::Result<Vec<lakescraper_core::ScrapedData>>
where
    W: Worker,
{
    Ok(worker.execute(urls).await)
}
