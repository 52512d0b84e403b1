mod cached_api;
mod flow_cache;

pub use cached_api::CachedJourneyApi;
pub use flow_cache::{CacheStats, FlowCache};
