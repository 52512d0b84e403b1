use moodreel_core::{IntentionCatalog, IntentionType, MainSentiment};
use serde_json::json;

#[test]
fn parses_main_sentiments() {
    let sentiments: Vec<MainSentiment> = serde_json::from_value(json!([
        { "id": 1, "name": "Sad", "description": "Feeling low", "shortDescription": "low" },
        { "id": 2, "name": "Happy", "description": null }
    ]))
    .unwrap();
    assert_eq!(sentiments[0].id, "1");
    assert_eq!(sentiments[0].short_description.as_deref(), Some("low"));
    assert_eq!(sentiments[1].description, "");
}

#[test]
fn parses_intention_catalog() {
    let catalog: IntentionCatalog = serde_json::from_value(json!({
        "sentimentId": 1,
        "sentimentName": "Sad",
        "intentions": [
            {
                "id": 10,
                "type": "PROCESS",
                "description": "Sit with it",
                "preferredGenres": ["Drama"],
                "avoidGenres": ["Horror"],
                "emotionalTone": "gentle"
            },
            { "id": 11, "type": "TRANSFORM", "description": "Cheer up" }
        ]
    }))
    .unwrap();
    assert_eq!(catalog.sentiment_id, "1");
    assert_eq!(catalog.intentions.len(), 2);
    assert_eq!(catalog.intentions[0].preferred_genres, vec!["Drama"]);
    assert_eq!(catalog.find(IntentionType::Transform).unwrap().id, "11");
    assert!(catalog.find(IntentionType::Explore).is_none());
    assert_eq!(IntentionType::Maintain.to_string(), "MAINTAIN");
}
