use std::future::Future;
use std::time::Duration;

use super::GatewayError;

/// Attempt budget and backoff schedule for one logical gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Wait after the failed attempt `attempt` (0-based): `base * 2^attempt`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Runs `op` until it succeeds, fails with a non-retryable error, or the
/// attempt budget runs out. `op` receives the 0-based attempt index.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, GatewayError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last = None;

    for attempt in 0..attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                tracing::warn!(attempt = attempt + 1, of = attempts, error = %err, "AI request attempt failed");
                last = Some(err);
                if attempt + 1 < attempts {
                    tokio::time::sleep(policy.delay_after(attempt)).await;
                }
            }
        }
    }

    let last = last.unwrap_or_else(|| GatewayError::ProviderError("Max retries exceeded".into()));
    Err(GatewayError::ExhaustedRetries {
        attempts,
        last: Box::new(last),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(1), Duration::from_millis(2000));
        assert_eq!(policy.delay_after(2), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_second_attempt_after_one_second() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let value = with_retry(&RetryPolicy::default(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(GatewayError::ProviderError("flaky".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(value, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(started.elapsed(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_aborts_immediately() {
        let calls = AtomicU32::new(0);
        let started = Instant::now();

        let result: Result<(), _> = with_retry(&RetryPolicy::default(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(GatewayError::invalid_key()) }
        })
        .await;

        assert_eq!(result, Err(GatewayError::invalid_key()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_surfaces_last_error() {
        let started = Instant::now();

        let result: Result<(), _> = with_retry(&RetryPolicy::default(), |attempt| async move {
            Err(GatewayError::MalformedResponse(format!("attempt {attempt}")))
        })
        .await;

        assert_eq!(
            result,
            Err(GatewayError::ExhaustedRetries {
                attempts: 3,
                last: Box::new(GatewayError::MalformedResponse("attempt 2".into())),
            })
        );
        // 1s + 2s, no wait after the final attempt.
        assert_eq!(started.elapsed(), Duration::from_millis(3000));
    }
}
