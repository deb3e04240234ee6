use std::collections::HashMap;
use std::time::Instant;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use lakescraper_core::{FetchOptions, FetchResult, Tier};
use tracing::{debug, warn};

use crate::block::{is_blocked, is_captcha};
use crate::Fetcher;

/// Tier-2: full browser rendering with stealth launch options, awaiting
/// network idle before reading content. Grounded on the teacher's
/// `HeadlessBrowser` wrapper (`--no-sandbox`/`--disable-dev-shm-usage`
/// launch args, poll-until-substantial-content navigation).
pub struct HeadlessBrowserFetcher {
    proxy_server: Option<String>,
}

impl HeadlessBrowserFetcher {
    pub fn new(proxy_server: Option<String>) -> Self {
        Self { proxy_server }
    }

    fn fetch_blocking(url: &str, proxy_server: Option<&str>) -> anyhow::Result<(u16, String)> {
        let mut args = vec!["--no-sandbox", "--disable-dev-shm-usage", "--disable-gpu"];
        let proxy_arg;
        if let Some(proxy) = proxy_server {
            proxy_arg = format!("--proxy-server={}", proxy);
            args.push(&proxy_arg);
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .args(args.iter().map(std::ffi::OsStr::new).collect())
            .build()?;

        let browser = Browser::new(launch_options)?;
        let tab = browser.new_tab()?;
        tab.navigate_to(url)?;
        tab.wait_until_navigated()?;
        let content = tab.get_content()?;
        // headless_chrome surfaces transport failures as Err rather than a
        // status code; a successful navigation is reported as 200.
        Ok((200, content))
    }
}

#[async_trait]
impl Fetcher for HeadlessBrowserFetcher {
    fn tier(&self) -> Tier {
        Tier::HeadlessBrowser
    }

    async fn fetch(&self, url: &str, options: &FetchOptions) -> FetchResult {
        let start = Instant::now();
        debug!(url, "fetching via tier-2 (headless_browser)");

        let url_owned = url.to_string();
        let proxy = self.proxy_server.clone();
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
                    headers: HashMap::new(),
                    tier_used: Tier::HeadlessBrowser,
                    cost_usd: Tier::HeadlessBrowser.cost_usd(),
                    duration_ms,
                    blocked,
                    captcha,
                }
            }
            Ok(Ok(Err(e))) => {
                warn!(url, error = %e, "tier-2 fetch failed");
                blocked_result(url, duration_ms, Tier::HeadlessBrowser)
            }
            Ok(Err(e)) => {
                warn!(url, error = %e, "tier-2 task panicked");
                blocked_result(url, duration_ms, Tier::HeadlessBrowser)
            }
            Err(_) => {
                warn!(url, "tier-2 fetch timed out");
                blocked_result(url, duration_ms, Tier::HeadlessBrowser)
            }
        }
    }
}

pub(crate) fn blocked_result(url: &str, duration_ms: u64, tier: Tier) -> FetchResult {
    FetchResult {
        url: url.to_string(),
        status: 0,
        body: String::new(),
        headers: HashMap::new(),
        tier_used: tier,
        cost_usd: tier.cost_usd(),
        duration_ms,
        blocked: true,
        captcha: false,
    }
}
