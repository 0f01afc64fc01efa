//! Retry logic for endpoint requests

use super::types::LlmClient;
use crate::error::{Redsm5Error, Redsm5Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

impl LlmClient {
    /// Execute a request with retry logic and exponential backoff.
    ///
    /// Only errors classified as transient by [`Redsm5Error::is_retryable`]
    /// are retried. The delay before retry `n` (0-based) is
    /// `base * 2^n` plus up to half of that as jitter.
    #[instrument(skip(self, operation), fields(max_retries = self.config.max_retries))]
    pub(super) async fn execute_with_retry<T, F, Fut>(&self, operation: F) -> Redsm5Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Redsm5Result<T>>,
    {
        let max_retries = self.config.max_retries;
        let mut last_error = None;

        for attempt in 0..=max_retries {
            match operation().await {
                Ok(response) => {
                    if attempt > 0 {
                        info!(attempt, "request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        warn!(error = %error, "non-retryable error");
                        return Err(error);
                    }

                    if attempt < max_retries {
                        let delay = self.backoff_delay(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = max_retries + 1,
                            delay_secs = delay.as_secs_f64(),
                            error = %error,
                            "retrying after failure"
                        );
                        if !delay.is_zero() {
                            sleep(delay).await;
                        }
                    } else {
                        warn!(
                            attempts = max_retries + 1,
                            error = %error,
                            "all retry attempts exhausted"
                        );
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Redsm5Error::other(format!(
                "All {} retry attempts failed without error details",
                max_retries + 1
            ))
        }))
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self
            .config
            .retry_base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt));
        if base_ms == 0 {
            return Duration::ZERO;
        }
        let jitter_ms = rand::thread_rng().gen_range(0..=base_ms / 2);
        Duration::from_millis(base_ms + jitter_ms)
    }
}
