use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use moodreel_core::MoodreelError;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::config::ApiConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport seam between [`JourneyApiClient`](crate::JourneyApiClient) and the network.
#[async_trait]
pub trait ApiBackend: Send + Sync {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, MoodreelError>;
}

/// Production backend using reqwest.
pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Backend whose requests honour the timeout in `config`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, MoodreelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MoodreelError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_error(e: reqwest::Error) -> MoodreelError {
    if e.is_timeout() {
        MoodreelError::Timeout(format!("request timed out: {e}"))
    } else {
        MoodreelError::Network(format!("HTTP request failed: {e}"))
    }
}

#[async_trait]
impl ApiBackend for HttpBackend {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, MoodreelError> {
        let mut builder = self.client.get(&request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        // Non-JSON error bodies are kept as text.
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => {
                    return Err(MoodreelError::Parsing(format!(
                        "failed to parse response JSON: {e}"
                    )))
                }
            }
        };

        Ok(ApiResponse { status, body })
    }
}

/// Test backend with queued responses; every request is recorded.
pub struct FakeBackend {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, MoodreelError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_response(&self, response: ApiResponse) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Ok(response));
        self
    }

    /// Queue a 200 response carrying `body`.
    pub fn push_json(&self, body: Value) -> &Self {
        self.push_response(ApiResponse::ok(body))
    }

    pub fn push_error(&self, error: MoodreelError) -> &Self {
        self.responses
            .try_lock()
            .expect("not concurrent during setup")
            .push_back(Err(error));
        self
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiBackend for FakeBackend {
    async fn get(&self, request: ApiRequest) -> Result<ApiResponse, MoodreelError> {
        self.requests.lock().await.push(request);
        let mut responses = self.responses.lock().await;
        responses
            .pop_front()
            .unwrap_or_else(|| Err(MoodreelError::Network("FakeBackend exhausted".to_string())))
    }
}
