use std::sync::Arc;

use async_trait::async_trait;
use moodreel_core::{
    FlowKey, IntentionCatalog, JourneyApi, JourneyFlow, MainSentiment, MoodreelError,
};

use crate::FlowCache;

/// A [`JourneyApi`] whose graph fetches go through a [`FlowCache`].
///
/// Catalogue endpoints are passed straight to the wrapped API.
pub struct CachedJourneyApi {
    inner: Arc<dyn JourneyApi>,
    cache: Arc<FlowCache>,
}

impl CachedJourneyApi {
    pub fn new(inner: Arc<dyn JourneyApi>, cache: Arc<FlowCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<FlowCache> {
        &self.cache
    }

    /// The graph for `key`, shared with every other caller of the cache.
    pub async fn flow(&self, key: &FlowKey) -> Result<Arc<JourneyFlow>, MoodreelError> {
        let inner = self.inner.clone();
        let owned = key.clone();
        self.cache
            .get_or_fetch(key, move || async move { inner.fetch_flow(&owned).await })
            .await
    }
}

#[async_trait]
impl JourneyApi for CachedJourneyApi {
    async fn main_sentiments(&self) -> Result<Vec<MainSentiment>, MoodreelError> {
        self.inner.main_sentiments().await
    }

    async fn journey_flow(&self, mood_id: &str) -> Result<JourneyFlow, MoodreelError> {
        let flow = self.flow(&FlowKey::mood(mood_id)).await?;
        Ok(JourneyFlow::clone(&flow))
    }

    async fn emotional_intentions(&self, mood_id: &str) -> Result<IntentionCatalog, MoodreelError> {
        self.inner.emotional_intentions(mood_id).await
    }

    async fn personalized_journey(
        &self,
        mood_id: &str,
        intention_id: &str,
    ) -> Result<JourneyFlow, MoodreelError> {
        let flow = self
            .flow(&FlowKey::personalized(mood_id, intention_id))
            .await?;
        Ok(JourneyFlow::clone(&flow))
    }
}
