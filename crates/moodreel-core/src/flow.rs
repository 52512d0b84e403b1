use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::movie::MovieSuggestion;
use crate::wire;

// ---------------------------------------------------------------------------
// EndState
// ---------------------------------------------------------------------------

/// The `isEndState` flag of an option.
///
/// The backend sends `true`, `false`, or nothing at all; every consumer has to
/// decide what an unset flag means, so it gets its own variant instead of
/// hiding inside `Option<bool>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EndState {
    /// `isEndState: true`: selecting the option ends the journey.
    Terminal,
    /// `isEndState: false`: the option leads to `nextStepId`.
    Continue,
    /// Flag absent or `null`.
    #[default]
    Ambiguous,
}

impl EndState {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => EndState::Terminal,
            Some(false) => EndState::Continue,
            None => EndState::Ambiguous,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            EndState::Terminal => Some(true),
            EndState::Continue => Some(false),
            EndState::Ambiguous => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, EndState::Ambiguous)
    }
}

impl Serialize for EndState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_flag().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EndState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(EndState::from_flag)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ---------------------------------------------------------------------------
// JourneyOption
// ---------------------------------------------------------------------------

/// One answer choice of a [`Step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyOption {
    #[serde(deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    pub next_step_id: Option<String>,
    #[serde(
        rename = "isEndState",
        default,
        skip_serializing_if = "EndState::is_ambiguous"
    )]
    pub end_state: EndState,
    #[serde(
        default,
        deserialize_with = "wire::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub movie_suggestions: Vec<MovieSuggestion>,
}

impl JourneyOption {
    /// An option with no flag, no target and no suggestions.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: None,
            next_step_id: None,
            end_state: EndState::Ambiguous,
            movie_suggestions: Vec::new(),
        }
    }

    /// A non-terminal option pointing at `next_step_id`.
    pub fn continue_to(
        id: impl Into<String>,
        text: impl Into<String>,
        next_step_id: impl Into<String>,
    ) -> Self {
        Self::new(id, text)
            .with_end_state(EndState::Continue)
            .with_next_step(next_step_id)
    }

    /// A terminal option carrying movie suggestions.
    pub fn terminal(
        id: impl Into<String>,
        text: impl Into<String>,
        suggestions: Vec<MovieSuggestion>,
    ) -> Self {
        Self::new(id, text)
            .with_end_state(EndState::Terminal)
            .with_suggestions(suggestions)
    }

    pub fn with_next_step(mut self, next_step_id: impl Into<String>) -> Self {
        self.next_step_id = Some(next_step_id.into());
        self
    }

    pub fn with_end_state(mut self, end_state: EndState) -> Self {
        self.end_state = end_state;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<MovieSuggestion>) -> Self {
        self.movie_suggestions = suggestions;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The referenced step id, with blank strings treated as absent.
    pub fn target_step_id(&self) -> Option<&str> {
        self.next_step_id.as_deref().filter(|id| !is_blank(id))
    }

    pub fn has_suggestions(&self) -> bool {
        !self.movie_suggestions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// One question node of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub step_id: String,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_question: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    pub options: Vec<JourneyOption>,
}

impl Step {
    pub fn new(step_id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: None,
            step_id: step_id.into(),
            order: 0,
            priority: None,
            question: question.into(),
            custom_question: None,
            options: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_custom_question(mut self, question: impl Into<String>) -> Self {
        self.custom_question = Some(question.into());
        self
    }

    pub fn with_option(mut self, option: JourneyOption) -> Self {
        self.options.push(option);
        self
    }

    /// `customQuestion` when it is non-blank, `question` otherwise.
    pub fn display_question(&self) -> &str {
        match self.custom_question.as_deref() {
            Some(custom) if !is_blank(custom) => custom,
            _ => &self.question,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&JourneyOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

// ---------------------------------------------------------------------------
// JourneyFlow
// ---------------------------------------------------------------------------

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFlow {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    main_sentiment_id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none")]
    emotional_intention_id: Option<String>,
    #[serde(default, deserialize_with = "wire::null_as_default")]
    steps: Vec<Step>,
}

/// The decision graph for one mood (and optional intention).
///
/// Steps keep the order the backend declared them in; lookups by `stepId` go
/// through an index where the first occurrence of a duplicated id wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawFlow", into = "RawFlow")]
pub struct JourneyFlow {
    id: Option<String>,
    main_sentiment_id: Option<String>,
    emotional_intention_id: Option<String>,
    steps: Vec<Step>,
    index: HashMap<String, usize>,
}

impl From<RawFlow> for JourneyFlow {
    fn from(raw: RawFlow) -> Self {
        let mut flow = JourneyFlow::new(raw.steps);
        flow.id = raw.id;
        flow.main_sentiment_id = raw.main_sentiment_id;
        flow.emotional_intention_id = raw.emotional_intention_id;
        flow
    }
}

impl From<JourneyFlow> for RawFlow {
    fn from(flow: JourneyFlow) -> Self {
        RawFlow {
            id: flow.id,
            main_sentiment_id: flow.main_sentiment_id,
            emotional_intention_id: flow.emotional_intention_id,
            steps: flow.steps,
        }
    }
}

impl JourneyFlow {
    pub fn new(steps: Vec<Step>) -> Self {
        let mut index = HashMap::with_capacity(steps.len());
        for (position, step) in steps.iter().enumerate() {
            index.entry(step.step_id.clone()).or_insert(position);
        }
        Self {
            id: None,
            main_sentiment_id: None,
            emotional_intention_id: None,
            steps,
            index,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_main_sentiment_id(mut self, id: impl Into<String>) -> Self {
        self.main_sentiment_id = Some(id.into());
        self
    }

    pub fn with_emotional_intention_id(mut self, id: impl Into<String>) -> Self {
        self.emotional_intention_id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn main_sentiment_id(&self) -> Option<&str> {
        self.main_sentiment_id.as_deref()
    }

    pub fn emotional_intention_id(&self) -> Option<&str> {
        self.emotional_intention_id.as_deref()
    }

    /// Steps in declared order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Exact lookup by `stepId`.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.index.get(step_id).map(|&position| &self.steps[position])
    }

    /// Lookup used by navigation: exact match first, then a match with both
    /// sides trimmed of surrounding whitespace.
    pub fn resolve_step(&self, step_id: &str) -> Option<&Step> {
        if let Some(step) = self.step(step_id) {
            return Some(step);
        }
        let wanted = step_id.trim();
        if wanted.is_empty() {
            return None;
        }
        self.steps.iter().find(|s| s.step_id.trim() == wanted)
    }

    pub fn option_count(&self) -> usize {
        self.steps.iter().map(|s| s.options.len()).sum()
    }
}
