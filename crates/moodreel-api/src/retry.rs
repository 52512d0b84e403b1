use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moodreel_core::{IntentionCatalog, JourneyApi, JourneyFlow, MainSentiment, MoodreelError};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the zero-based `attempt` failed.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt as u32)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

/// Retries retryable failures of the wrapped [`JourneyApi`] with exponential backoff.
pub struct RetryingApi {
    inner: Arc<dyn JourneyApi>,
    policy: RetryPolicy,
}

impl RetryingApi {
    pub fn new(inner: Arc<dyn JourneyApi>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn attempt<T, F, Fut>(&self, endpoint: &str, call: F) -> Result<T, MoodreelError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, MoodreelError>>,
    {
        let mut last_error = None;
        for attempt in 0..self.policy.max_attempts {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.policy.max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::info!(endpoint, attempt = attempt + 1, ?delay, error = %e, "retrying");
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_error.unwrap_or_else(|| MoodreelError::Network("retry exhausted".to_string())))
    }
}

#[async_trait]
impl JourneyApi for RetryingApi {
    async fn main_sentiments(&self) -> Result<Vec<MainSentiment>, MoodreelError> {
        self.attempt("main_sentiments", || self.inner.main_sentiments()).await
    }

    async fn journey_flow(&self, mood_id: &str) -> Result<JourneyFlow, MoodreelError> {
        self.attempt("journey_flow", || self.inner.journey_flow(mood_id)).await
    }

    async fn emotional_intentions(&self, mood_id: &str) -> Result<IntentionCatalog, MoodreelError> {
        self.attempt("emotional_intentions", || self.inner.emotional_intentions(mood_id)).await
    }

    async fn personalized_journey(
        &self,
        mood_id: &str,
        intention_id: &str,
    ) -> Result<JourneyFlow, MoodreelError> {
        self.attempt("personalized_journey", || {
            self.inner.personalized_journey(mood_id, intention_id)
        })
        .await
    }
}
