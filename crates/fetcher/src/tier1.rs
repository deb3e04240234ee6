use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use lakescraper_core::{FetchOptions, FetchResult, Tier};
use tracing::{debug, warn};

use crate::block::{is_blocked, is_captcha};
use crate::Fetcher;

/// Tier-1: a direct HTTP client with a browser-like user-agent and automatic
/// redirect following. Grounded on the teacher's `TorDriver` shape (single
/// client, translate-don't-raise, populate cost/tier/timing).
pub struct BasicHttpFetcher {
    client: reqwest::Client,
}

impl BasicHttpFetcher {
    pub fn new(user_agent: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for BasicHttpFetcher {
    fn tier(&self) -> Tier {
        Tier::BasicHttp
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        let start = Instant::now();
        debug!(url, "fetching via tier-1 (basic_http)");

        let mut req = self.client.get(url).timeout(options.timeout);
        for (k, v) in &options.headers {
            req = req.header(k, v);
        }

        let result = async {
            let resp = req.send().await?;
            let status = resp.status().as_u16();
            let mut headers = HashMap::new();
            for (k, v) in resp.headers() {
                if let Ok(val) = v.to_str() {
                    headers.insert(k.as_str().to_string(), val.to_string());
                }
            }
            let body = resp.text().await?;
            Ok::<_, reqwest::Error>((status, headers, body))
        }
        .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok((status, headers, body)) => {
                let blocked = is_blocked(status, body.len(), false);
                let captcha = is_captcha(&body);
                FetchResult {
                    url: url.to_string(),
                    status,
                    body,
                    headers,
                    tier_used: Tier::BasicHttp,
                    cost_usd: Tier::BasicHttp.cost_usd(),
                    duration_ms,
                    blocked,
                    captcha,
                }
            }
            Err(e) => {
                warn!(url, error = %e, "tier-1 fetch failed");
                FetchResult {
                    url: url.to_string(),
                    status: 0,
                    body: String::new(),
                    headers: HashMap::new(),
                    tier_used: Tier::BasicHttp,
                    cost_usd: Tier::BasicHttp.cost_usd(),
                    duration_ms,
                    blocked: true,
                    captcha: false,
                }
            }
        }
    }
}
