use moodreel_core::{EndState, JourneyFlow, JourneyOption, Movie, MovieSuggestion, Step};
use moodreel_graph::{validate, DefectKind};

fn suggestion(title: &str) -> MovieSuggestion {
    MovieSuggestion::new(Movie::new(title), "fits the mood")
}

fn kinds(flow: &JourneyFlow) -> Vec<DefectKind> {
    validate(flow).into_iter().map(|d| d.kind).collect()
}

#[test]
fn well_formed_graph_has_no_defects() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "Start?")
            .with_order(1)
            .with_option(JourneyOption::continue_to("1", "Go on", "b"))
            .with_option(JourneyOption::terminal("2", "Stop", vec![suggestion("Up")])),
        Step::new("b", "Then?")
            .with_order(2)
            .with_option(JourneyOption::continue_to("3", "Back", "a")),
    ]);
    assert!(validate(&flow).is_empty());
}

#[test]
fn non_terminal_without_next_step_is_flagged() {
    let flow = JourneyFlow::new(vec![Step::new("a", "?")
        .with_option(JourneyOption::new("1", "x").with_end_state(EndState::Continue))
        .with_option(
            JourneyOption::new("2", "y")
                .with_end_state(EndState::Continue)
                .with_next_step(""),
        )]);
    let defects = validate(&flow);
    assert_eq!(defects.len(), 2);
    assert!(defects
        .iter()
        .all(|d| d.kind == DefectKind::NonTerminalWithoutNextStep));
    assert_eq!(defects[0].option_id.as_deref(), Some("1"));
    assert_eq!(defects[1].option_id.as_deref(), Some("2"));
}

#[test]
fn one_dangling_defect_per_offending_option() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?")
            .with_option(JourneyOption::continue_to("1", "x", "nowhere"))
            .with_option(JourneyOption::continue_to("2", "y", "nowhere"))
            .with_option(JourneyOption::continue_to("3", "z", "b")),
        Step::new("b", "?").with_option(JourneyOption::continue_to("4", "w", "also-missing")),
    ]);
    let dangling: Vec<_> = validate(&flow)
        .into_iter()
        .filter(|d| d.kind == DefectKind::DanglingNextStep)
        .collect();
    assert_eq!(dangling.len(), 3);
    let ids: Vec<_> = dangling
        .iter()
        .map(|d| d.option_id.clone().unwrap())
        .collect();
    assert_eq!(ids, vec!["1", "2", "4"]);
}

#[test]
fn untrimmed_reference_is_reported_with_hint() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?").with_option(JourneyOption::continue_to("1", "x", "q2")),
        Step::new("q2 ", "?").with_option(JourneyOption::continue_to("2", "y", "a")),
    ]);
    let defects = validate(&flow);
    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].kind, DefectKind::DanglingNextStep);
    assert!(defects[0].detail.contains("after trimming"));
}

#[test]
fn terminal_flag_problems() {
    let flow = JourneyFlow::new(vec![Step::new("a", "?")
        .with_option(JourneyOption::terminal("1", "empty", vec![]))
        .with_option(
            JourneyOption::terminal("2", "both", vec![suggestion("Heat")]).with_next_step("a"),
        )]);
    assert_eq!(
        kinds(&flow),
        vec![
            DefectKind::TerminalWithoutSuggestions,
            DefectKind::InconsistentTerminalFlag
        ]
    );
}

#[test]
fn step_level_defects() {
    let flow = JourneyFlow::new(vec![
        Step::new("", "Who am I?").with_option(JourneyOption::continue_to("1", "x", "b")),
        Step::new("b", "   "),
        Step::new("b", "dup").with_option(JourneyOption::continue_to("2", "", "b")),
    ]);
    assert_eq!(
        kinds(&flow),
        vec![
            DefectKind::MissingStepId,
            DefectKind::MissingQuestion,
            DefectKind::EmptyOptions,
            DefectKind::DuplicateStepId,
            DefectKind::MissingOptionText,
        ]
    );
}

#[test]
fn ambiguous_option_only_flagged_when_unfollowable() {
    let flow = JourneyFlow::new(vec![Step::new("a", "?")
        .with_option(JourneyOption::new("1", "dead end"))
        .with_option(JourneyOption::new("2", "implicit next").with_next_step("a"))
        .with_option(
            JourneyOption::new("3", "implicit end").with_suggestions(vec![suggestion("Her")]),
        )]);
    let defects = validate(&flow);
    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].kind, DefectKind::AmbiguousOption);
    assert_eq!(defects[0].option_id.as_deref(), Some("1"));
}

#[test]
fn defect_display_mentions_location() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?").with_option(JourneyOption::continue_to("1", "x", "zzz"))
    ]);
    let rendered = validate(&flow)[0].to_string();
    assert!(rendered.starts_with("dangling_next_step at step 'a' option '1'"));
}

#[test]
fn empty_graph_has_no_defects() {
    assert!(validate(&JourneyFlow::new(vec![])).is_empty());
}
