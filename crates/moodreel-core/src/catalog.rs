use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wire;

/// A mood the visitor can start a journey from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainSentiment {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
}

/// What the visitor wants to do with their mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntentionType {
    Process,
    Transform,
    Maintain,
    Explore,
}

impl IntentionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentionType::Process => "PROCESS",
            IntentionType::Transform => "TRANSFORM",
            IntentionType::Maintain => "MAINTAIN",
            IntentionType::Explore => "EXPLORE",
        }
    }
}

impl fmt::Display for IntentionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalIntention {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(rename = "type")]
    pub intention_type: IntentionType,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub preferred_genres: Vec<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub avoid_genres: Vec<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub emotional_tone: String,
}

/// Intentions offered for one mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentionCatalog {
    #[serde(deserialize_with = "wire::id")]
    pub sentiment_id: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub sentiment_name: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub intentions: Vec<EmotionalIntention>,
}

impl IntentionCatalog {
    pub fn find(&self, intention_type: IntentionType) -> Option<&EmotionalIntention> {
        self.intentions
            .iter()
            .find(|i| i.intention_type == intention_type)
    }
}
