use std::sync::Arc;

use moodreel_api::{ApiConfig, ApiResponse, FakeBackend, JourneyApiClient};
use moodreel_core::{IntentionType, JourneyApi, MoodreelError};
use serde_json::json;

fn setup(backend: Arc<FakeBackend>) -> JourneyApiClient {
    let config = ApiConfig::new("http://movies.test/").with_header("X-Client", "walkthrough");
    JourneyApiClient::new(config, backend)
}

fn flow_body() -> serde_json::Value {
    json!({
        "id": 4,
        "mainSentimentId": 1,
        "steps": [{
            "stepId": "q1",
            "order": 1,
            "question": "Company?",
            "options": [{
                "id": 10,
                "text": "Alone",
                "isEndState": true,
                "movieSuggestions": [{
                    "movie": { "title": "Lost in Translation" },
                    "reason": "Quiet"
                }]
            }]
        }]
    })
}

#[tokio::test]
async fn main_sentiments_parses_list() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(json!([
        { "id": 1, "name": "Calm", "description": "Slow evening" },
        { "id": 2, "name": "Restless", "description": null, "shortDescription": "Wired" }
    ]));

    let client = setup(backend.clone());
    let sentiments = client.main_sentiments().await.unwrap();

    assert_eq!(sentiments.len(), 2);
    assert_eq!(sentiments[0].id, "1");
    assert_eq!(sentiments[1].description, "");
    assert_eq!(sentiments[1].short_description.as_deref(), Some("Wired"));

    let requests = backend.requests().await;
    assert_eq!(requests[0].url, "http://movies.test/main-sentiments");
    assert!(requests[0]
        .headers
        .contains(&("X-Client".to_string(), "walkthrough".to_string())));
}

#[tokio::test]
async fn endpoints_use_expected_paths() {
    let backend = Arc::new(FakeBackend::new());
    backend
        .push_json(flow_body())
        .push_json(json!({
            "sentimentId": 1,
            "sentimentName": "Calm",
            "intentions": [{ "id": 5, "type": "MAINTAIN", "description": "Stay here" }]
        }))
        .push_json(flow_body());

    let client = setup(backend.clone());
    let flow = client.journey_flow("1").await.unwrap();
    assert_eq!(flow.step("q1").unwrap().options[0].id, "10");

    let catalog = client.emotional_intentions("1").await.unwrap();
    assert_eq!(catalog.find(IntentionType::Maintain).unwrap().id, "5");

    client.personalized_journey("1", "5").await.unwrap();

    let urls: Vec<String> = backend.requests().await.into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            "http://movies.test/main-sentiments/1/journey-flow",
            "http://movies.test/api/emotional-intentions/1",
            "http://movies.test/api/personalized-journey/1/5",
        ]
    );
}

#[tokio::test]
async fn path_segments_are_escaped() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(flow_body());
    let client = setup(backend.clone());
    client.journey_flow("a b/c").await.unwrap();
    assert_eq!(
        backend.requests().await[0].url,
        "http://movies.test/main-sentiments/a%20b%2Fc/journey-flow"
    );
}

#[tokio::test]
async fn non_success_status_maps_to_http_error() {
    let backend = Arc::new(FakeBackend::new());
    backend
        .push_response(ApiResponse {
            status: 404,
            body: json!({ "message": "Sentiment not found" }),
        })
        .push_response(ApiResponse {
            status: 502,
            body: json!("Bad gateway"),
        });

    let client = setup(backend);
    let err = client.journey_flow("99").await.unwrap_err();
    assert_eq!(
        err,
        MoodreelError::Http {
            status: 404,
            body: "Sentiment not found".to_string()
        }
    );
    assert!(!err.is_retryable());

    let err = client.main_sentiments().await.unwrap_err();
    assert!(matches!(err, MoodreelError::Http { status: 502, ref body } if body == "Bad gateway"));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn unexpected_shape_is_a_parsing_error() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_json(json!({ "steps": "not a list" }));
    let client = setup(backend);
    let err = client.journey_flow("1").await.unwrap_err();
    assert!(matches!(err, MoodreelError::Parsing(_)));
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let backend = Arc::new(FakeBackend::new());
    backend.push_error(MoodreelError::Network("connection reset".to_string()));
    let client = setup(backend);
    let err = client.personalized_journey("1", "2").await.unwrap_err();
    assert_eq!(err, MoodreelError::Network("connection reset".to_string()));
}

#[tokio::test]
async fn invalid_base_url_is_a_config_error() {
    let backend = Arc::new(FakeBackend::new());
    let client = JourneyApiClient::new(ApiConfig::new("not a url"), backend.clone());
    let err = client.main_sentiments().await.unwrap_err();
    assert!(matches!(err, MoodreelError::Config(_)));
    assert!(backend.requests().await.is_empty());
}
