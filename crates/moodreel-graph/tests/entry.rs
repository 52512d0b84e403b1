use moodreel_core::{JourneyFlow, Step};
use moodreel_graph::entry_step;

#[test]
fn priority_one_wins() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?").with_order(1),
        Step::new("b", "?").with_order(5).with_priority(1),
    ]);
    assert_eq!(entry_step(&flow).unwrap().step_id, "b");
}

#[test]
fn order_one_when_no_priority() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?").with_order(0),
        Step::new("b", "?").with_order(1).with_priority(2),
    ]);
    assert_eq!(entry_step(&flow).unwrap().step_id, "b");
}

#[test]
fn minimum_order_with_stable_tie_break() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "?").with_order(7),
        Step::new("b", "?").with_order(3),
        Step::new("c", "?").with_order(3),
    ]);
    assert_eq!(entry_step(&flow).unwrap().step_id, "b");
}

#[test]
fn empty_graph_has_no_entry() {
    assert!(entry_step(&JourneyFlow::new(vec![])).is_none());
}
