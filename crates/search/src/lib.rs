mod stub;

use async_trait::async_trait;
use lakescraper_core::SearchResult;

pub use stub::StubSearchProvider;

/// §9: opaque search client consumed by discovery. A real implementation
/// wraps whatever external search API is configured; the bundled
/// `StubSearchProvider` is deterministic and needs no network access.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, page: u32) -> anyhow::Result<Vec<SearchResult>>;
}
