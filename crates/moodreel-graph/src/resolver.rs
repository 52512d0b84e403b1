use moodreel_core::MovieSuggestion;

use crate::state::{Breadcrumb, NavigationState, TerminalOutcome};

/// What the results view needs once a journey ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionBundle {
    pub suggestions: Vec<MovieSuggestion>,
    /// Shown as "suggested because you chose: …".
    pub origin_option_text: String,
    pub origin_question: String,
    pub path: Vec<Breadcrumb>,
}

/// Package a terminal outcome for hand-off.
///
/// Suggestions are passed through untouched; ordering and filtering belong
/// to the view. A non-blank `path_label` replaces the option text.
pub fn resolve(outcome: &TerminalOutcome, path_label: Option<&str>) -> SuggestionBundle {
    let origin_option_text = match path_label {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => outcome.option_text.clone(),
    };
    SuggestionBundle {
        suggestions: outcome.suggestions.clone(),
        origin_option_text,
        origin_question: outcome.question.clone(),
        path: outcome.path.clone(),
    }
}

/// [`resolve`] for a controller state; `None` unless the journey ended.
pub fn resolve_state(state: &NavigationState) -> Option<SuggestionBundle> {
    match state {
        NavigationState::Terminal(outcome) => Some(resolve(outcome, None)),
        _ => None,
    }
}
