use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod catalog;
mod flow;
mod movie;
mod wire;

pub use catalog::{EmotionalIntention, IntentionCatalog, IntentionType, MainSentiment};
pub use flow::{EndState, JourneyFlow, JourneyOption, Step};
pub use movie::{Movie, MovieSuggestion};

// ---------------------------------------------------------------------------
// FlowKey
// ---------------------------------------------------------------------------

/// Identifies one decision graph: a mood, optionally narrowed by an emotional intention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowKey {
    pub mood_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intention_id: Option<String>,
}

impl FlowKey {
    pub fn new(mood_id: impl Into<String>, intention_id: Option<String>) -> Self {
        Self {
            mood_id: mood_id.into(),
            intention_id,
        }
    }

    /// Key for the generic journey of a mood.
    pub fn mood(mood_id: impl Into<String>) -> Self {
        Self::new(mood_id, None)
    }

    /// Key for the journey personalized by an emotional intention.
    pub fn personalized(mood_id: impl Into<String>, intention_id: impl Into<String>) -> Self {
        Self::new(mood_id, Some(intention_id.into()))
    }

    pub fn is_personalized(&self) -> bool {
        self.intention_id.is_some()
    }
}

impl fmt::Display for FlowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.intention_id {
            Some(intention) => write!(f, "{}/{}", self.mood_id, intention),
            None => write!(f, "{}", self.mood_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for fetching and caching journey data.
///
/// Navigation faults are not errors: the controller represents them as a
/// `Failed` state. This enum covers everything that happens before a graph
/// reaches the controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodreelError {
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("http error ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("parsing error: {0}")]
    Parsing(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("cache error: {0}")]
    Cache(String),
}

impl MoodreelError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            MoodreelError::Network(_) | MoodreelError::Timeout(_) => true,
            MoodreelError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// JourneyApi
// ---------------------------------------------------------------------------

/// Read-only access to the journey backend.
#[async_trait]
pub trait JourneyApi: Send + Sync {
    /// `GET /main-sentiments`
    async fn main_sentiments(&self) -> Result<Vec<MainSentiment>, MoodreelError>;

    /// `GET /main-sentiments/{moodId}/journey-flow`
    async fn journey_flow(&self, mood_id: &str) -> Result<JourneyFlow, MoodreelError>;

    /// `GET /api/emotional-intentions/{moodId}`
    async fn emotional_intentions(&self, mood_id: &str) -> Result<IntentionCatalog, MoodreelError>;

    /// `GET /api/personalized-journey/{moodId}/{intentionId}`
    async fn personalized_journey(
        &self,
        mood_id: &str,
        intention_id: &str,
    ) -> Result<JourneyFlow, MoodreelError>;

    /// Fetch the graph identified by `key`, personalized when it carries an intention.
    async fn fetch_flow(&self, key: &FlowKey) -> Result<JourneyFlow, MoodreelError> {
        match &key.intention_id {
            Some(intention_id) => self.personalized_journey(&key.mood_id, intention_id).await,
            None => self.journey_flow(&key.mood_id).await,
        }
    }
}
