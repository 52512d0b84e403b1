use moodreel_core::{FlowKey, MoodreelError};

#[test]
fn error_variants_display() {
    let errors = vec![
        MoodreelError::Network("test".into()),
        MoodreelError::Timeout("test".into()),
        MoodreelError::Http {
            status: 404,
            body: "missing".into(),
        },
        MoodreelError::Parsing("test".into()),
        MoodreelError::Config("test".into()),
        MoodreelError::Cache("test".into()),
    ];
    for err in &errors {
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn retryable_errors() {
    assert!(MoodreelError::Network("reset".into()).is_retryable());
    assert!(MoodreelError::Timeout("slow".into()).is_retryable());
    assert!(MoodreelError::Http {
        status: 503,
        body: String::new()
    }
    .is_retryable());
    assert!(MoodreelError::Http {
        status: 429,
        body: String::new()
    }
    .is_retryable());
    assert!(!MoodreelError::Http {
        status: 404,
        body: String::new()
    }
    .is_retryable());
    assert!(!MoodreelError::Parsing("bad".into()).is_retryable());
}

#[test]
fn flow_key_display() {
    assert_eq!(FlowKey::mood("3").to_string(), "3");
    assert_eq!(FlowKey::personalized("3", "9").to_string(), "3/9");
    assert!(FlowKey::personalized("3", "9").is_personalized());
    assert!(!FlowKey::mood("3").is_personalized());
}
