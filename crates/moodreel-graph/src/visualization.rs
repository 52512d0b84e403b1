use moodreel_core::{EndState, JourneyFlow, JourneyOption, Step};

use crate::entry::entry_step;

/// Node every terminal option points at in rendered diagrams.
pub const RESULTS_NODE: &str = "__results__";
/// Node every unresolvable reference points at in rendered diagrams.
pub const MISSING_NODE: &str = "__missing__";

enum Edge<'a> {
    Step(&'a Step),
    Results,
    Missing(&'a str),
    Nowhere,
}

fn edge_of<'a>(flow: &'a JourneyFlow, option: &'a JourneyOption) -> Edge<'a> {
    let terminal = match option.end_state {
        EndState::Terminal => true,
        EndState::Continue => false,
        EndState::Ambiguous => option.target_step_id().is_none() && option.has_suggestions(),
    };
    if terminal {
        return Edge::Results;
    }
    match option.target_step_id() {
        Some(target) => match flow.resolve_step(target) {
            Some(step) => Edge::Step(step),
            None => Edge::Missing(target),
        },
        None => Edge::Nowhere,
    }
}

/// Node id from the step's declared position.
fn node_id(flow: &JourneyFlow, step: &Step) -> String {
    let position = flow
        .steps()
        .iter()
        .position(|s| std::ptr::eq(s, step))
        .unwrap_or_default();
    format!("s{position}")
}

fn escape(label: &str) -> String {
    label.replace('"', "#quot;")
}

/// Render the journey as a Mermaid flowchart.
///
/// - Steps are rectangles `s<position>` labelled with `stepId: question`
/// - Terminal options are solid edges into the rounded results node
/// - References to unknown steps are dashed edges into the missing node
/// - Options that lead nowhere are emitted as Mermaid comments
pub fn draw_mermaid(flow: &JourneyFlow) -> String {
    let mut lines = vec!["graph TD".to_string()];

    for step in flow.steps() {
        lines.push(format!(
            "    {}[\"{}: {}\"]",
            node_id(flow, step),
            escape(&step.step_id),
            escape(step.display_question())
        ));
    }
    lines.push(format!("    {RESULTS_NODE}([\"results\"])"));

    if let Some(entry) = entry_step(flow) {
        lines.push(format!("    __start__([\"start\"]) --> {}", node_id(flow, entry)));
    }

    let mut missing = false;
    for step in flow.steps() {
        let source = node_id(flow, step);
        for option in &step.options {
            let label = escape(&option.text);
            match edge_of(flow, option) {
                Edge::Step(target) => {
                    lines.push(format!(
                        "    {source} -->|\"{label}\"| {}",
                        node_id(flow, target)
                    ));
                }
                Edge::Results => {
                    lines.push(format!("    {source} -->|\"{label}\"| {RESULTS_NODE}"));
                }
                Edge::Missing(_) => {
                    missing = true;
                    lines.push(format!("    {source} -.->|\"{label}\"| {MISSING_NODE}"));
                }
                Edge::Nowhere => {
                    lines.push(format!("    %% {source} option '{}' leads nowhere", option.id));
                }
            }
        }
    }
    if missing {
        lines.push(format!("    {MISSING_NODE}([\"missing\"])"));
    }

    lines.join("\n")
}

/// Render the journey as a plain text summary.
pub fn draw_ascii(flow: &JourneyFlow) -> String {
    let mut lines = vec!["Journey:".to_string()];
    let entry = entry_step(flow)
        .map(|s| s.step_id.as_str())
        .unwrap_or("<none>");
    lines.push(format!("  Entry: {entry}"));
    lines.push("  Steps:".to_string());

    for step in flow.steps() {
        lines.push(format!("    {} \"{}\"", step.step_id, step.display_question()));
        for option in &step.options {
            let target = match edge_of(flow, option) {
                Edge::Step(target) => target.step_id.clone(),
                Edge::Results => format!("results ({})", option.movie_suggestions.len()),
                Edge::Missing(target) => format!("??? ({target})"),
                Edge::Nowhere => "???".to_string(),
            };
            lines.push(format!("      [{}] {} -> {target}", option.id, option.text));
        }
    }

    lines.join("\n")
}
