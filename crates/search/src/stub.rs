use std::collections::HashMap;

use async_trait::async_trait;
use lakescraper_core::SearchResult;
use tracing::debug;

use crate::SearchProvider;

/// Deterministic in-memory `SearchProvider` for local use and tests: results
/// are seeded per `(query, page)` pair ahead of time rather than fetched from
/// a real search API. Unseeded pages return an empty result set.
#[derive(Default)]
pub struct StubSearchProvider {
    fixtures: HashMap<(String, u32), Vec<SearchResult>>,
}

impl StubSearchProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, query: impl Into<String>, page: u32, results: Vec<SearchResult>) -> Self {
        self.fixtures.insert((query.into(), page), results);
        self
    }
}

#[async_trait]
impl SearchProvider for StubSearchProvider {
    async fn search(&self, query: &str, page: u32) -> anyhow::Result<Vec<SearchResult>> {
        let results = self.fixtures.get(&(query.to_string(), page)).cloned().unwrap_or_default();
        debug!(query, page, count = results.len(), "stub_search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unseeded_query_returns_empty() {
        let provider = StubSearchProvider::new();
        let results = provider.search("anything", 1).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn seeded_page_returns_exact_fixture() {
        let provider = StubSearchProvider::new().seed(
            "b2b saas",
            1,
            vec![SearchResult {
                url: "https://acme.io".to_string(),
                title: Some("Acme".to_string()),
                snippet: None,
                score: 3.0,
            }],
        );
        let results = provider.search("b2b saas", 1).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://acme.io");
    }
}
