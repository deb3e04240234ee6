use std::time::{Duration, Instant};

use dashmap::DashMap;

/// §5 rate limiting: a per-domain minimum inter-request interval. The map is
/// process-local, grounded on the teacher's `DashMap`-backed per-host
/// timestamp tracking in `crates/frontier`.
pub struct RateLimiter {
    last_request: DashMap<String, Instant>,
    default_delay: Duration,
}

impl RateLimiter {
    pub fn new(default_delay_ms: u64) -> Self {
        Self {
            last_request: DashMap::new(),
            default_delay: Duration::from_millis(default_delay_ms),
        }
    }

    /// Waits, if needed, until `delay_ms` (or the default) has elapsed since
    /// the last call for `domain`.
    pub async fn wait(&self, domain: &str, delay_ms: Option<u64>) {
        let delay = delay_ms.map(Duration::from_millis).unwrap_or(self.default_delay);
        let remaining = match self.last_request.get(domain) {
            Some(last) => delay.checked_sub(last.elapsed()),
            None => None,
        };
        if let Some(remaining) = remaining {
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
        }
        self.last_request.insert(domain.to_string(), Instant::now());
    }

    pub fn reset(&self, domain: &str) {
        self.last_request.remove(domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_call_waits_at_least_the_delay() {
        let limiter = RateLimiter::new(50);
        limiter.wait("example.com", None).await;
        let start = Instant::now();
        limiter.wait("example.com", None).await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn distinct_domains_do_not_block_each_other() {
        let limiter = RateLimiter::new(1000);
        limiter.wait("a.com", None).await;
        let start = Instant::now();
        limiter.wait("b.com", None).await;
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
