use std::collections::{HashMap, HashSet};

use chrono::Utc;
use lakescraper_core::{DataType, DiscoveryJobDomain, DiscoveryStatus, SearchResult};
use lakescraper_mapper::urlutil::extract_domain;
use lakescraper_search::SearchProvider;
use lakescraper_storage::Storage;
use tracing::{info, warn};
use uuid::Uuid;

use crate::queue::JobQueue;

/// §4.12 / §8-S5: collapse search results to one per registrable domain,
/// keeping the highest-scored hit, skipping domains already in `skip`.
/// Ported from `src/services/domain_extractor.py::extract_unique_domains`.
pub fn extract_unique_domains(results: &[SearchResult], skip: &HashSet<String>) -> HashMap<String, SearchResult> {
    let mut by_domain: HashMap<String, SearchResult> = HashMap::new();
    for result in results {
        let Some(domain) = extract_domain(&result.url) else {
            continue;
        };
        if skip.contains(&domain) {
            continue;
        }
        match by_domain.get(&domain) {
            Some(existing) if existing.score >= result.score => {}
            _ => {
                by_domain.insert(domain, result.clone());
            }
        }
    }
    by_domain
}

pub struct DiscoveryConfig {
    pub recent_scrape_skip_days: i64,
    pub max_domains_per_query: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            recent_scrape_skip_days: 30,
            max_domains_per_query: 50,
        }
    }
}

/// §4.12: fan a search query out into one scrape job per surviving unique
/// domain. The `DiscoveryJob` moves `searching -> scraping`, and only reaches
/// `completed` directly when every candidate was skipped (no child jobs were
/// ever eligible) — this mirrors the original's fire-and-forget dispatch: the
/// discovery job itself does not wait on its children's completion.
#[allow(clippy::too_many_arguments)]
pub async fn run_discovery(
    storage: &Storage,
    search: &dyn SearchProvider,
    queue: &JobQueue,
    config: &DiscoveryConfig,
    discovery_id: Uuid,
    query: &str,
    search_pages: u32,
    template_id: &str,
    max_pages_per_domain: i32,
    data_types: &[DataType],
) -> anyhow::Result<()> {
    let mut results = Vec::new();
    for page in 1..=search_pages {
        results.extend(search.search(query, page).await?);
    }

    let recently_scraped = recently_scraped_domains(storage, &results, config.recent_scrape_skip_days).await?;
    let all_unique = extract_unique_domains(&results, &HashSet::new());

    let domains_found = all_unique.len() as i32;
    let mut domains_skipped = 0i32;

    for (domain, hit) in &all_unique {
        if !recently_scraped.contains(domain) {
            continue;
        }
        domains_skipped += 1;
        storage
            .insert_discovery_domain(&DiscoveryJobDomain {
                id: Uuid::new_v4(),
                discovery_job_id: discovery_id,
                domain: domain.clone(),
                source_url: hit.url.clone(),
                title: hit.title.clone(),
                snippet: hit.snippet.clone(),
                score: hit.score,
                status: "skipped".to_string(),
                skip_reason: Some("recently scraped".to_string()),
                scrape_job_id: None,
            })
            .await?;
    }

    let survivors = extract_unique_domains(&results, &recently_scraped);

    let mut eligible_count = 0usize;
    for (domain, hit) in survivors {
        eligible_count += 1;
        let eligible = eligible_count <= config.max_domains_per_query;

        if !eligible {
            domains_skipped += 1;
            storage
                .insert_discovery_domain(&DiscoveryJobDomain {
                    id: Uuid::new_v4(),
                    discovery_job_id: discovery_id,
                    domain: domain.clone(),
                    source_url: hit.url.clone(),
                    title: hit.title.clone(),
                    snippet: hit.snippet.clone(),
                    score: hit.score,
                    status: "skipped".to_string(),
                    skip_reason: Some("max domains per query reached".to_string()),
                    scrape_job_id: None,
                })
                .await?;
            continue;
        }

        let job = storage.create_job(&domain, template_id).await?;
        storage
            .insert_discovery_domain(&DiscoveryJobDomain {
                id: Uuid::new_v4(),
                discovery_job_id: discovery_id,
                domain: domain.clone(),
                source_url: hit.url.clone(),
                title: hit.title.clone(),
                snippet: hit.snippet.clone(),
                score: hit.score,
                status: "pending".to_string(),
                skip_reason: None,
                scrape_job_id: Some(job.id),
            })
            .await?;

        let input = crate::job::JobInput {
            job_id: job.id,
            domain: domain.clone(),
            template_id: template_id.to_string(),
            max_pages: max_pages_per_domain,
            data_types: data_types.to_vec(),
        };
        if queue.enqueue(input).await.is_err() {
            warn!(domain, "discovery_enqueue_failed: queue closed");
        }
    }

    let all_skipped = domains_found == domains_skipped;
    storage
        .update_discovery_status(discovery_id, if all_skipped { DiscoveryStatus::Completed } else { DiscoveryStatus::Scraping }, all_skipped)
        .await?;

    info!(discovery_id = %discovery_id, domains_found, domains_skipped, "discovery_dispatched");
    Ok(())
}

async fn recently_scraped_domains(storage: &Storage, results: &[SearchResult], window_days: i64) -> anyhow::Result<HashSet<String>> {
    let mut recent = HashSet::new();
    let cutoff = Utc::now() - chrono::Duration::days(window_days);
    let mut seen_domains = HashSet::new();
    for result in results {
        let Some(domain) = extract_domain(&result.url) else { continue };
        if !seen_domains.insert(domain.clone()) {
            continue;
        }
        if let Some(meta) = storage.get_domain_metadata(&domain).await? {
            if meta.last_scraped_at.map(|t| t >= cutoff).unwrap_or(false) {
                recent.insert(domain);
            }
        }
    }
    Ok(recent)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(url: &str, score: f64) -> SearchResult {
        SearchResult {
            url: url.to_string(),
            title: None,
            snippet: None,
            score,
        }
    }

    #[test]
    fn dedupe_keeps_highest_scored_per_domain() {
        let results = vec![
            result("https://example.com/a", 2.0),
            result("https://example.com/b", 5.0),
            result("https://acme.io", 3.0),
        ];
        let unique = extract_unique_domains(&results, &HashSet::new());
        assert_eq!(unique.len(), 2);
        assert_eq!(unique.get("example.com").unwrap().score, 5.0);
        assert_eq!(unique.get("acme.io").unwrap().score, 3.0);
    }

    #[test]
    fn skip_set_filters_domains() {
        let results = vec![result("https://example.com/a", 2.0)];
        let mut skip = HashSet::new();
        skip.insert("example.com".to_string());
        assert!(extract_unique_domains(&results, &skip).is_empty());
    }
}
