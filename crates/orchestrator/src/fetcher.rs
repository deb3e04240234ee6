use std::sync::Arc;

use async_trait::async_trait;
use lakescraper_core::{FetchOptions, FetchResult, Tier};
use lakescraper_fetcher::{build_fetcher, Fetcher};
use tracing::warn;
use uuid::Uuid;

use crate::cost_tracker::CostTracker;
use crate::escalation::EscalationPolicy;
use crate::rate_limiter::RateLimiter;

/// Wraps the three tier fetchers behind the escalation policy, so every
/// `fetch` call runs the §4.11 "per-page fetching" loop: try the domain's
/// current tier, escalate on a blocked/captcha/degraded result up to tier 3,
/// record the outcome, and update cost/rate-limit bookkeeping.
///
/// `tier()` reports the nominal starting tier; the tier actually used for a
/// given call is carried in the returned `FetchResult::tier_used`.
pub struct EscalatingFetcher {
    job_id: Uuid,
    domain: String,
    tiers: [Box<dyn Fetcher>; 3],
    escalation: Arc<EscalationPolicy>,
    rate_limiter: Arc<RateLimiter>,
    cost_tracker: Arc<CostTracker>,
    rate_limit_ms: u64,
}

impl EscalatingFetcher {
    pub fn new(
        job_id: Uuid,
        domain: String,
        user_agent: String,
        proxy_url: Option<String>,
        escalation: Arc<EscalationPolicy>,
        rate_limiter: Arc<RateLimiter>,
        cost_tracker: Arc<CostTracker>,
        rate_limit_ms: u64,
    ) -> anyhow::Result<Self> {
        let tiers = [
            build_fetcher(Tier::BasicHttp, user_agent.clone(), None)?,
            build_fetcher(Tier::HeadlessBrowser, user_agent.clone(), None)?,
            build_fetcher(Tier::HeadlessProxy, user_agent, proxy_url)?,
        ];
        Ok(Self {
            job_id,
            domain,
            tiers,
            escalation,
            rate_limiter,
            cost_tracker,
            rate_limit_ms,
        })
    }

    fn fetcher_for(&self, tier: Tier) -> &dyn Fetcher {
        self.tiers[Tier::CHAIN.iter().position(|t| *t == tier).unwrap_or(0)].as_ref()
    }
}

#[async_trait]
impl Fetcher for EscalatingFetcher {
    fn tier(&self) -> Tier {
        Tier::BasicHttp
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        self.rate_limiter.wait(&self.domain, Some(self.rate_limit_ms)).await;

        let mut tier = self
            .escalation
            .decide_initial_tier(&self.domain)
            .await
            .unwrap_or(Tier::BasicHttp);

        loop {
            let result = self.fetcher_for(tier).fetch(url, options).await;
            self.cost_tracker.record_cost(self.job_id, &self.domain, result.cost_usd);

            let escalate = self.escalation.should_escalate(&result);
            if !escalate || tier == Tier::HeadlessProxy {
                let success = !result.blocked && !result.captcha;
                if let Err(e) = self.escalation.record_result(&self.domain, &result, success).await {
                    warn!(domain = %self.domain, error = %e, "record_result failed");
                }
                return result;
            }

            let Some(next) = self.escalation.get_next_tier(tier) else {
                let _ = self.escalation.record_result(&self.domain, &result, false).await;
                return result;
            };
            tier = next;
        }
    }
}
