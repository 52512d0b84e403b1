use std::collections::HashSet;
use std::fmt;

use moodreel_core::{EndState, JourneyFlow, JourneyOption, Step};

/// Category of a structural problem found in a journey graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectKind {
    MissingStepId,
    DuplicateStepId,
    MissingQuestion,
    EmptyOptions,
    MissingOptionText,
    NonTerminalWithoutNextStep,
    TerminalWithoutSuggestions,
    DanglingNextStep,
    InconsistentTerminalFlag,
    AmbiguousOption,
}

impl DefectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectKind::MissingStepId => "missing_step_id",
            DefectKind::DuplicateStepId => "duplicate_step_id",
            DefectKind::MissingQuestion => "missing_question",
            DefectKind::EmptyOptions => "empty_options",
            DefectKind::MissingOptionText => "missing_option_text",
            DefectKind::NonTerminalWithoutNextStep => "non_terminal_without_next_step",
            DefectKind::TerminalWithoutSuggestions => "terminal_without_suggestions",
            DefectKind::DanglingNextStep => "dangling_next_step",
            DefectKind::InconsistentTerminalFlag => "inconsistent_terminal_flag",
            DefectKind::AmbiguousOption => "ambiguous_option",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An advisory finding. Navigation still runs on a defective graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defect {
    pub kind: DefectKind,
    pub step_id: String,
    pub option_id: Option<String>,
    pub detail: String,
}

impl Defect {
    fn step(kind: DefectKind, step: &Step, detail: impl Into<String>) -> Self {
        Self {
            kind,
            step_id: step.step_id.clone(),
            option_id: None,
            detail: detail.into(),
        }
    }

    fn option(
        kind: DefectKind,
        step: &Step,
        option: &JourneyOption,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            step_id: step.step_id.clone(),
            option_id: Some(option.id.clone()),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.option_id {
            Some(option_id) => write!(
                f,
                "{} at step '{}' option '{}': {}",
                self.kind, self.step_id, option_id, self.detail
            ),
            None => write!(f, "{} at step '{}': {}", self.kind, self.step_id, self.detail),
        }
    }
}

/// Inspect a graph for structural defects.
///
/// Steps are checked in declared order, options in declared order within
/// each step. The result is empty for a well-formed graph.
pub fn validate(flow: &JourneyFlow) -> Vec<Defect> {
    let mut defects = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for step in flow.steps() {
        if step.step_id.trim().is_empty() {
            defects.push(Defect::step(DefectKind::MissingStepId, step, "step has no stepId"));
        } else if !seen.insert(step.step_id.as_str()) {
            defects.push(Defect::step(
                DefectKind::DuplicateStepId,
                step,
                "stepId already used by an earlier step",
            ));
        }

        if step.display_question().trim().is_empty() {
            defects.push(Defect::step(DefectKind::MissingQuestion, step, "step has no question"));
        }

        if step.options.is_empty() {
            defects.push(Defect::step(DefectKind::EmptyOptions, step, "step has no options"));
        }

        for option in &step.options {
            check_option(flow, step, option, &mut defects);
        }
    }

    defects
}

fn check_option(
    flow: &JourneyFlow,
    step: &Step,
    option: &JourneyOption,
    defects: &mut Vec<Defect>,
) {
    if option.text.trim().is_empty() {
        defects.push(Defect::option(
            DefectKind::MissingOptionText,
            step,
            option,
            "option has no text",
        ));
    }

    let target = option.target_step_id();

    match option.end_state {
        EndState::Terminal => {
            if !option.has_suggestions() {
                defects.push(Defect::option(
                    DefectKind::TerminalWithoutSuggestions,
                    step,
                    option,
                    "terminal option carries no movie suggestions",
                ));
            }
            if let Some(target) = target {
                defects.push(Defect::option(
                    DefectKind::InconsistentTerminalFlag,
                    step,
                    option,
                    format!("terminal option also points at '{target}'"),
                ));
            }
        }
        EndState::Continue => {
            if target.is_none() {
                defects.push(Defect::option(
                    DefectKind::NonTerminalWithoutNextStep,
                    step,
                    option,
                    "non-terminal option has no nextStepId",
                ));
            }
        }
        EndState::Ambiguous => {
            if target.is_none() && !option.has_suggestions() {
                defects.push(Defect::option(
                    DefectKind::AmbiguousOption,
                    step,
                    option,
                    "isEndState unset with neither nextStepId nor suggestions",
                ));
            }
        }
    }

    if let Some(target) = target {
        if flow.step(target).is_none() {
            let detail = match flow.resolve_step(target) {
                Some(near) => format!(
                    "nextStepId '{target}' only matches step '{}' after trimming",
                    near.step_id
                ),
                None => format!("nextStepId '{target}' matches no step"),
            };
            defects.push(Defect::option(DefectKind::DanglingNextStep, step, option, detail));
        }
    }
}

/// Emit one warning per defect.
pub fn log_defects(flow: &JourneyFlow, defects: &[Defect]) {
    let flow_id = flow.id().unwrap_or("-");
    for defect in defects {
        tracing::warn!(
            flow_id = %flow_id,
            kind = %defect.kind,
            step_id = %defect.step_id,
            option_id = defect.option_id.as_deref().unwrap_or("-"),
            "journey graph defect: {}",
            defect.detail
        );
    }
}
