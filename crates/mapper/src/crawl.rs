use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use futures::future::join_all;
use lakescraper_core::{FetchOptions, FetchResult};
use lakescraper_fetcher::Fetcher;
use lakescraper_parser::Document;
use tracing::debug;

use crate::urlutil::{is_valid_scrape_url, normalize_url, same_registrable_domain};

const WAVE_CONCURRENCY: usize = 10;
const POLITENESS_DELAY: Duration = Duration::from_millis(100);

/// §4.5 step 2: BFS crawl from `root`, bounded by `max_pages`, fetching a
/// bounded number of pages per wave with a tier-1 fetcher. Block/captcha on a
/// fetch simply discards that page's out-links; it never aborts the crawl.
pub async fn bfs_crawl(root: &str, max_pages: usize, fetcher: &dyn Fetcher) -> Vec<String> {
    let mut discovered = Vec::new();
    let mut seen = HashSet::new();
    let mut frontier = VecDeque::new();

    if let Some(root_norm) = normalize_url(root, None) {
        seen.insert(root_norm.clone());
        frontier.push_back(root_norm);
    } else {
        return discovered;
    }

    let options = FetchOptions::default();

    while !frontier.is_empty() && discovered.len() < max_pages {
        let mut wave = Vec::new();
        while wave.len() < WAVE_CONCURRENCY {
            let Some(url) = frontier.pop_front() else {
                break;
            };
            wave.push(url);
        }

        let fetches: Vec<FetchResult> = join_all(wave.iter().map(|url| fetcher.fetch(url, &options))).await;

        for (url, result) in wave.iter().zip(fetches) {
            discovered.push(url.clone());
            if discovered.len() >= max_pages {
                break;
            }
            if result.blocked || result.captcha {
                debug!(url = %url, "blocked during crawl, discarding out-links");
                continue;
            }
            let Some(doc) = Document::parse(&result.body, url) else {
                continue;
            };
            for link in doc.extract_all_links() {
                if !same_registrable_domain(&link, root) {
                    continue;
                }
                if !is_valid_scrape_url(&link) {
                    continue;
                }
                let Some(norm) = normalize_url(&link, Some(url)) else {
                    continue;
                };
                if seen.insert(norm.clone()) {
                    frontier.push_back(norm);
                }
            }
        }

        if !frontier.is_empty() && discovered.len() < max_pages {
            tokio::time::sleep(POLITENESS_DELAY).await;
        }
    }

    discovered.truncate(max_pages);
    discovered
}
