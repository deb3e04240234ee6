use std::time::Instant;

use async_trait::async_trait;
use lakescraper_core::{FetchOptions, FetchResult, Tier};
use tracing::{debug, warn};

use crate::block::{is_blocked, is_captcha};
use crate::tier2::{blocked_result, HeadlessBrowserFetcher};
use crate::Fetcher;

/// Tier-3: tier-2 routed through a configured proxy endpoint. When no proxy
/// is configured it degrades to plain tier-2 behavior but still reports
/// `tier_used = headless_proxy` and the tier-3 cost (§4.1, §9-iii): cost
/// accounting here captures intent, not raw expenditure.
pub struct HeadlessProxyFetcher {
    proxy_url: Option<String>,
}

impl HeadlessProxyFetcher {
    pub fn new(proxy_url: Option<String>) -> Self {
        Self { proxy_url }
    }
}

#[async_trait]
impl Fetcher for HeadlessProxyFetcher {
    fn tier(&self) -> Tier {
        Tier::HeadlessProxy
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        let start = Instant::now();
        debug!(url, has_proxy = self.proxy_url.is_some(), "fetching via tier-3 (headless_proxy)");

        let url_owned = url.to_string();
        let proxy = self.proxy_url.clone();
        let fetch_task = tokio::task::spawn_blocking(move || {
            HeadlessBrowserFetcher::fetch_blocking(&url_owned, proxy.as_deref())
        });

        let result = tokio::time::timeout(options.timeout, fetch_task).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(Ok((status, body)))) => {
                let blocked = is_blocked(status, body.len(), false);
                let captcha = is_captcha(&body);
                FetchResult {
                    url: url.to_string(),
                    status,
                    body,
                    headers: std::collections::HashMap::new(),
                    tier_used: Tier::HeadlessProxy,
                    cost_usd: Tier::HeadlessProxy.cost_usd(),
                    duration_ms,
                    blocked,
                    captcha,
                }
            }
            Ok(Ok(Err(e))) => {
                warn!(url, error = %e, "tier-3 fetch failed");
                blocked_result(url, duration_ms, Tier::HeadlessProxy)
            }
            Ok(Err(e)) => {
                warn!(url, error = %e, "tier-3 task panicked");
                blocked_result(url, duration_ms, Tier::HeadlessProxy)
            }
            Err(_) => {
                warn!(url, "tier-3 fetch timed out");
                blocked_result(url, duration_ms, Tier::HeadlessProxy)
            }
        }
    }
}
