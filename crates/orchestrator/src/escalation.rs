use lakescraper_core::{FetchResult, Tier};
use lakescraper_storage::Storage;
use tracing::info;

/// §4.3: three-tier adaptive escalation. `should_escalate`/`get_next_tier`
/// are plain functions on the shared types (`FetchResult::should_escalate`,
/// `Tier::next`); this wraps the stateful half — reading and writing
/// per-domain history — ported from the original `EscalationService`.
pub struct EscalationPolicy {
    storage: Storage,
}

impl EscalationPolicy {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub async fn decide_initial_tier(&self, domain: &str) -> anyhow::Result<Tier> {
        let meta = self.storage.get_domain_metadata(domain).await?;
        Ok(meta
            .and_then(|m| m.last_successful_strategy)
            .and_then(|s| Tier::from_str_loose(&s))
            .unwrap_or(Tier::BasicHttp))
    }

    pub fn should_escalate(&self, result: &FetchResult) -> bool {
        result.should_escalate()
    }

    pub fn get_next_tier(&self, current: Tier) -> Option<Tier> {
        current.next()
    }

    pub async fn record_result(&self, domain: &str, result: &FetchResult, success: bool) -> anyhow::Result<()> {
        self.storage
            .upsert_domain_metadata(
                domain,
                success.then(|| result.tier_used.as_str()),
                if result.blocked { 1 } else { 0 },
                None,
                None,
            )
            .await?;
        info!(domain, tier = result.tier_used.as_str(), success, blocked = result.blocked, "escalation_result");
        Ok(())
    }
}
