use moodreel_core::{EndState, JourneyFlow, JourneyOption, Movie, MovieSuggestion, Step};
use serde_json::json;

fn sample_payload() -> serde_json::Value {
    json!({
        "id": 7,
        "mainSentimentId": 3,
        "steps": [
            {
                "id": 11,
                "stepId": "q1",
                "order": 1,
                "question": "How was your day?",
                "options": [
                    { "id": 1, "text": "Rough", "nextStepId": "q2", "isEndState": false },
                    {
                        "id": "2",
                        "text": "Great",
                        "nextStepId": null,
                        "isEndState": true,
                        "movieSuggestions": [
                            {
                                "movie": {
                                    "title": "Paddington 2",
                                    "year": 2017,
                                    "genres": ["Comedy"]
                                },
                                "reason": "Pure warmth"
                            }
                        ]
                    }
                ]
            },
            {
                "stepId": "q2 ",
                "order": 2,
                "question": "",
                "customQuestion": "Want to talk about it?",
                "options": [ { "id": 3, "text": "No" } ]
            }
        ]
    })
}

#[test]
fn deserializes_backend_payload() {
    let flow: JourneyFlow = serde_json::from_value(sample_payload()).unwrap();
    assert_eq!(flow.id(), Some("7"));
    assert_eq!(flow.main_sentiment_id(), Some("3"));
    assert_eq!(flow.len(), 2);
    assert_eq!(flow.option_count(), 3);

    let q1 = flow.step("q1").unwrap();
    assert_eq!(q1.id.as_deref(), Some("11"));
    assert_eq!(q1.options[0].id, "1");
    assert_eq!(q1.options[0].end_state, EndState::Continue);
    assert_eq!(q1.options[1].end_state, EndState::Terminal);
    assert_eq!(q1.options[1].movie_suggestions[0].movie.title, "Paddington 2");

    let q2 = &flow.steps()[1];
    assert_eq!(q2.options[0].end_state, EndState::Ambiguous);
    assert!(q2.options[0].movie_suggestions.is_empty());
}

#[test]
fn display_question_prefers_custom_question() {
    let flow: JourneyFlow = serde_json::from_value(sample_payload()).unwrap();
    assert_eq!(flow.steps()[0].display_question(), "How was your day?");
    assert_eq!(flow.steps()[1].display_question(), "Want to talk about it?");

    let blank_custom = Step::new("s", "Base").with_custom_question("   ");
    assert_eq!(blank_custom.display_question(), "Base");
}

#[test]
fn resolve_step_falls_back_to_trimmed_match() {
    let flow: JourneyFlow = serde_json::from_value(sample_payload()).unwrap();
    assert!(flow.step("q2").is_none());
    assert_eq!(flow.resolve_step("q2").unwrap().step_id, "q2 ");
    assert_eq!(flow.resolve_step("  q1 ").unwrap().step_id, "q1");
    assert!(flow.resolve_step("q3").is_none());
    assert!(flow.resolve_step("   ").is_none());
}

#[test]
fn duplicate_step_ids_resolve_to_first_occurrence() {
    let flow = JourneyFlow::new(vec![
        Step::new("a", "first"),
        Step::new("a", "second"),
    ]);
    assert_eq!(flow.step("a").unwrap().question, "first");
}

#[test]
fn end_state_serializes_back_to_flag() {
    let terminal = JourneyOption::terminal(
        "o1",
        "Done",
        vec![MovieSuggestion::new(Movie::new("Amélie"), "whimsy")],
    );
    let value = serde_json::to_value(&terminal).unwrap();
    assert_eq!(value["isEndState"], json!(true));

    let ambiguous = JourneyOption::new("o2", "Hmm");
    let value = serde_json::to_value(&ambiguous).unwrap();
    assert!(value.get("isEndState").is_none());
    assert!(value.get("movieSuggestions").is_none());
}

#[test]
fn blank_next_step_id_counts_as_missing() {
    let option = JourneyOption::new("o", "x").with_next_step("  ");
    assert!(option.target_step_id().is_none());
    let option = JourneyOption::continue_to("o", "x", "q9");
    assert_eq!(option.target_step_id(), Some("q9"));
}

#[test]
fn flow_round_trips_metadata() {
    let flow = JourneyFlow::new(vec![Step::new("a", "?")])
        .with_id("f1")
        .with_main_sentiment_id("m1")
        .with_emotional_intention_id("i1");
    let value = serde_json::to_value(&flow).unwrap();
    assert_eq!(value["emotionalIntentionId"], json!("i1"));
    let back: JourneyFlow = serde_json::from_value(value).unwrap();
    assert_eq!(back, flow);
}
