use moodreel_core::{JourneyFlow, Step};

/// Pick the step a journey starts at.
///
/// `priority == 1` wins, then `order == 1`, then the lowest `order`. Ties go
/// to the step declared first.
pub fn entry_step(flow: &JourneyFlow) -> Option<&Step> {
    let steps = flow.steps();
    steps
        .iter()
        .find(|s| s.priority == Some(1))
        .or_else(|| steps.iter().find(|s| s.order == 1))
        .or_else(|| steps.iter().min_by_key(|s| s.order))
}
