use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Generic exponential-backoff retry, ported from the original `retry_async`
/// helper. Retries `max_retries` times beyond the first attempt, doubling the
/// delay each time up to `max_delay`.
pub async fn retry_async<T, E, F, Fut>(
    mut f: F,
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Debug,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt == max_retries {
                    return Err(err);
                }
                let delay = base_delay.saturating_mul(1 << attempt).min(max_delay);
                warn!(attempt = attempt + 1, max_retries, ?delay, error = ?err, "retry_attempt");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_on_a_later_attempt() {
        let attempts = AtomicU32::new(0);
        let result: Result<u32, &str> = retry_async(
            || async {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err("not yet")
                } else {
                    Ok(n)
                }
            },
            3,
            Duration::from_millis(1),
            Duration::from_millis(5),
        )
        .await;
        assert_eq!(result, Ok(2));
    }

    #[tokio::test]
    async fn exhausts_retries_and_returns_last_error() {
        let result: Result<u32, &str> = retry_async(
            || async { Err("always fails") },
            2,
            Duration::from_millis(1),
            Duration::from_millis(5),
        )
        .await;
        assert_eq!(result, Err("always fails"));
    }
}
