//! Moodreel: mood-driven movie journeys.
//!
//! A visitor picks a mood (and optionally an emotional intention), answers a
//! short series of questions, and ends on a set of movie suggestions. This
//! crate re-exports the sub-crates and glues them together in
//! [`JourneySession`].
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `default` | `http` |
//! | `http` | `JourneyApiClient`, `HttpBackend`, `RetryingApi`, `ApiConfig` |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use moodreel::api::{ApiConfig, HttpBackend, JourneyApiClient};
//! use moodreel::cache::FlowCache;
//! use moodreel::JourneySession;
//!
//! let config = ApiConfig::from_env()?;
//! let backend = Arc::new(HttpBackend::from_config(&config)?);
//! let api = Arc::new(JourneyApiClient::new(config, backend));
//! let mut session = JourneySession::new(api, Arc::new(FlowCache::new()));
//! session.begin("1", None).await;
//! ```

mod session;
pub use session::JourneySession;

/// Data model, `JourneyApi` and `MoodreelError`. Always available.
pub use moodreel_core as core;

/// Validator, navigation controller, terminal resolver and diagram rendering.
pub use moodreel_graph as graph;

/// Single-flight journey graph cache.
pub use moodreel_cache as cache;

/// HTTP client for the journey backend.
#[cfg(feature = "http")]
pub use moodreel_api as api;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
