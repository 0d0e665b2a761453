//! Per-target delivery policy: a timeout on every attempt plus optional
//! exponential-backoff retries.

use std::future::Future;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use fleetban_common::RelayConfig;
use fleetban_core::{RelayDeliveryError, RelayResult};

/// First retry delay
const RETRY_MIN_DELAY: Duration = Duration::from_millis(200);
/// Retry delay ceiling
const RETRY_MAX_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Bound on a single attempt
    pub timeout: Duration,
    /// Attempts after the first; 0 means deliver at most once
    pub max_retries: usize,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_retries: 0,
        }
    }
}

impl From<&RelayConfig> for DeliveryPolicy {
    fn from(config: &RelayConfig) -> Self {
        Self {
            timeout: config.timeout,
            max_retries: config.max_retries,
        }
    }
}

impl DeliveryPolicy {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(RETRY_MIN_DELAY)
            .with_max_delay(RETRY_MAX_DELAY)
            .with_max_times(self.max_retries)
            .with_jitter()
    }

    /// Run `send` under this policy
    ///
    /// Only transient failures are retried.
    pub async fn deliver<F, Fut>(&self, mut send: F) -> RelayResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = RelayResult>,
    {
        let limit = self.timeout;
        let mut attempt = || {
            let fut = send();
            async move {
                tokio::time::timeout(limit, fut)
                    .await
                    .unwrap_or(Err(RelayDeliveryError::Timeout(limit)))
            }
        };

        if self.max_retries == 0 {
            return attempt().await;
        }

        attempt
            .retry(self.backoff())
            .when(RelayDeliveryError::is_transient)
            .notify(|err: &RelayDeliveryError, delay: Duration| {
                tracing::warn!(error = %err, ?delay, "Relay delivery failed, retrying");
            })
            .await
    }
}
