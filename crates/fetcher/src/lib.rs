pub mod block;
pub mod tier1;
pub mod tier2;
pub mod tier3;

use async_trait::async_trait;
use lakescraper_core::{FetchOptions, FetchResult, Tier};

/// A fetcher exposes a single operation: given a URL and options, return a
/// `FetchResult`. Implementations MUST never raise on network errors; see
/// §4.1 — failures are translated into a blocked `FetchResult` instead.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn tier(&self) -> Tier;
    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult;
}

/// Build the fetcher for a given tier. `proxy_url` is only consulted by
/// tier-3; tier-3 degrades to tier-2 behavior when it is absent (§4.1, §9-iii).
pub fn build_fetcher(
    tier: Tier,
    user_agent: String,
    proxy_url: Option<String>,
) -> anyhow::Result<Box<dyn Fetcher>> {
    Ok(match tier {
        Tier::BasicHttp => Box::new(tier1::BasicHttpFetcher::new(user_agent)?),
        Tier::HeadlessBrowser => Box::new(tier2::HeadlessBrowserFetcher::new(None)),
        Tier::HeadlessProxy => Box::new(tier3::HeadlessProxyFetcher::new(proxy_url)),
    })
}
