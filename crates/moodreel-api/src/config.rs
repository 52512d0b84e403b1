use std::time::Duration;

use moodreel_core::MoodreelError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

const URL_VAR: &str = "MOODREEL_API_URL";
const TIMEOUT_VAR: &str = "MOODREEL_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub headers: Vec<(String, String)>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
            headers: Vec::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Read `MOODREEL_API_URL` and `MOODREEL_API_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, MoodreelError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MoodreelError> {
        let base_url = lookup(URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                MoodreelError::Config(format!(
                    "{TIMEOUT_VAR} must be a whole number of seconds, got '{raw}'"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
