pub mod classifier;
pub mod crawl;
pub mod sitemap;
pub mod urlutil;

use lakescraper_core::{ClassifiedUrl, FetchOptions};
use lakescraper_fetcher::Fetcher;
use tracing::info;

use crate::urlutil::{ensure_scheme, is_valid_scrape_url, validate_and_deduplicate};

/// §4.5 domain mapper: try the sitemap first, fall back to a bounded BFS
/// crawl, then classify every surviving URL.
pub async fn map_domain(domain: &str, max_pages: usize, fetcher: &dyn Fetcher) -> Vec<ClassifiedUrl> {
    let root = ensure_scheme(domain, "https");
    let sitemap_url = format!("{}/sitemap.xml", root.trim_end_matches('/'));

    let options = FetchOptions::default();
    let sitemap_result = fetcher.fetch(&sitemap_url, &options).await;

    let urls = if sitemap_result.status == 200 && !sitemap_result.blocked {
        info!(domain, "sitemap found, using it instead of crawling");
        sitemap::parse_sitemap(&sitemap_result.body)
            .into_iter()
            .filter(|u| is_valid_scrape_url(u))
            .take(max_pages)
            .collect::<Vec<_>>()
    } else {
        info!(domain, "no sitemap, falling back to crawl");
        crawl::bfs_crawl(&root, max_pages, fetcher).await
    };

    validate_and_deduplicate(&urls)
        .into_iter()
        .map(|u| classifier::classify_url(&u))
        .collect()
}
