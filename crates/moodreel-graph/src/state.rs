use std::fmt;

use moodreel_core::{FlowKey, JourneyOption, MoodreelError, MovieSuggestion, Step};
use thiserror::Error;

/// What the controller does with an option whose `isEndState` flag is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Follow `nextStepId` when present, else end on suggestions when present.
    #[default]
    Tolerant,
    /// Always fail with [`FailureReason::AmbiguousOption`].
    Strict,
}

/// Why a journey cannot continue. Recoverable through `back()` or `restart()`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("graph has no entry step")]
    NoEntryStep,
    #[error("step '{step_id}' has no options")]
    EmptyNextStep { step_id: String },
    #[error("option '{option_id}' points at unknown step '{next_step_id}'")]
    DanglingNextStep {
        option_id: String,
        next_step_id: String,
    },
    #[error("option '{option_id}' continues but has no next step")]
    MissingNextStep { option_id: String },
    #[error("option '{option_id}' ends the journey without suggestions")]
    TerminalWithoutSuggestions { option_id: String },
    #[error("option '{option_id}' is neither terminal nor linked to a next step")]
    AmbiguousOption { option_id: String },
    #[error("failed to load journey: {0}")]
    NetworkFailure(MoodreelError),
}

/// One answered question on the way through a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub step_id: String,
    pub question: String,
    pub option_id: String,
    pub option_text: String,
}

impl Breadcrumb {
    pub(crate) fn new(step: &Step, option: &JourneyOption) -> Self {
        Self {
            step_id: step.step_id.clone(),
            question: step.display_question().to_string(),
            option_id: option.id.clone(),
            option_text: option.text.clone(),
        }
    }
}

/// The journey ended on an option carrying movie suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalOutcome {
    pub step_id: String,
    pub question: String,
    pub option_id: String,
    pub option_text: String,
    /// The option's `movieSuggestions`, unchanged.
    pub suggestions: Vec<MovieSuggestion>,
    /// Every answer given, ending with the terminal one.
    pub path: Vec<Breadcrumb>,
}

/// Observable state of a [`NavigationController`](crate::NavigationController).
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationState {
    Idle,
    AwaitingGraph(FlowKey),
    AtStep(Step),
    Terminal(TerminalOutcome),
    Failed(FailureReason),
}

impl NavigationState {
    pub fn name(&self) -> &'static str {
        match self {
            NavigationState::Idle => "idle",
            NavigationState::AwaitingGraph(_) => "awaiting_graph",
            NavigationState::AtStep(_) => "at_step",
            NavigationState::Terminal(_) => "terminal",
            NavigationState::Failed(_) => "failed",
        }
    }

    pub fn step(&self) -> Option<&Step> {
        match self {
            NavigationState::AtStep(step) => Some(step),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NavigationState::Terminal(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, NavigationState::Failed(_))
    }
}

/// Why a selection was refused without touching the controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The controller is not showing a step.
    NotAtStep,
    /// The option does not belong to the current step.
    OptionNotInStep { option_id: String },
    /// `confirm()` was called with nothing chosen.
    NoSelection,
}

/// Result of `select()`; every call yields one.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced,
    Terminal,
    Failed(FailureReason),
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    SteppedBack,
    /// History is empty; leaving the journey is up to the caller.
    ExitJourney,
}

/// Identifies the journey a graph fetch was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JourneyTicket(pub(crate) u64);

impl fmt::Display for JourneyTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("journey ticket {0} is stale")]
pub struct StaleTicket(pub JourneyTicket);

/// Published to subscribers after every controller operation.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSnapshot {
    pub state: NavigationState,
    pub history_depth: usize,
    pub selection: Option<String>,
}
