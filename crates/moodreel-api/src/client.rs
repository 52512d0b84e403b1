use std::sync::Arc;

use async_trait::async_trait;
use moodreel_core::{IntentionCatalog, JourneyApi, JourneyFlow, MainSentiment, MoodreelError};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::backend::{ApiBackend, ApiRequest, ApiResponse};
use crate::config::ApiConfig;

/// REST client for the journey backend.
pub struct JourneyApiClient {
    config: ApiConfig,
    backend: Arc<dyn ApiBackend>,
}

impl JourneyApiClient {
    pub fn new(config: ApiConfig, backend: Arc<dyn ApiBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn build_request(&self, segments: &[&str]) -> Result<ApiRequest, MoodreelError> {
        let mut url = reqwest::Url::parse(&self.config.base_url).map_err(|e| {
            MoodreelError::Config(format!("invalid base url '{}': {e}", self.config.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                MoodreelError::Config(format!(
                    "base url '{}' cannot take a path",
                    self.config.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        headers.extend(self.config.headers.iter().cloned());

        Ok(ApiRequest {
            url: url.to_string(),
            headers,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, MoodreelError> {
        let request = self.build_request(segments)?;
        tracing::debug!(url = %request.url, "GET");
        let response = self.backend.get(request).await?;
        check_status(&response)?;
        serde_json::from_value(response.body)
            .map_err(|e| MoodreelError::Parsing(format!("unexpected response shape: {e}")))
    }
}

fn check_status(resp: &ApiResponse) -> Result<(), MoodreelError> {
    if resp.is_success() {
        return Ok(());
    }
    let body = match &resp.body {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other
            .get("message")
            .or_else(|| other.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    };
    tracing::warn!(status = resp.status, body = %body, "journey backend returned an error");
    Err(MoodreelError::Http {
        status: resp.status,
        body,
    })
}

#[async_trait]
impl JourneyApi for JourneyApiClient {
    async fn main_sentiments(&self) -> Result<Vec<MainSentiment>, MoodreelError> {
        self.get_json(&["main-sentiments"]).await
    }

    async fn journey_flow(&self, mood_id: &str) -> Result<JourneyFlow, MoodreelError> {
        self.get_json(&["main-sentiments", mood_id, "journey-flow"]).await
    }

    async fn emotional_intentions(&self, mood_id: &str) -> Result<IntentionCatalog, MoodreelError> {
        self.get_json(&["api", "emotional-intentions", mood_id]).await
    }

    async fn personalized_journey(
        &self,
        mood_id: &str,
        intention_id: &str,
    ) -> Result<JourneyFlow, MoodreelError> {
        self.get_json(&["api", "personalized-journey", mood_id, intention_id]).await
    }
}
