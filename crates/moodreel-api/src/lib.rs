mod backend;
pub use backend::{ApiBackend, ApiRequest, ApiResponse, FakeBackend, HttpBackend};

mod config;
pub use config::{ApiConfig, DEFAULT_BASE_URL};

mod client;
pub use client::JourneyApiClient;

mod retry;
pub use retry::{RetryPolicy, RetryingApi};
