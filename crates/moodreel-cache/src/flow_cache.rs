use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use moodreel_core::{FlowKey, JourneyFlow, MoodreelError};

type FetchResult = Result<Arc<JourneyFlow>, MoodreelError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

enum Slot {
    Ready(Arc<JourneyFlow>),
    Pending { id: u64, fetch: SharedFetch },
}

enum Claim {
    Hit(Arc<JourneyFlow>),
    Wait { id: u64, fetch: SharedFetch },
}

/// Counters describing how a [`FlowCache`] has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a stored graph.
    pub hits: u64,
    /// Lookups that started a fetch.
    pub misses: u64,
    /// Lookups that attached to a fetch already in flight.
    pub joined: u64,
    /// Fetches that ended in an error.
    pub failures: u64,
    /// Graphs currently stored.
    pub entries: usize,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<FlowKey, Slot>,
    stored: VecDeque<FlowKey>,
    next_id: u64,
    stats: CacheStats,
}

/// Session-scoped store of fetched journey graphs.
///
/// At most one fetch runs per key: callers arriving while it is in flight
/// wait on the same shared future and get the same result. A failed fetch
/// leaves nothing behind, so the next lookup fetches again. A fetch that
/// every caller stopped waiting on is resumed by the next caller for the key.
pub struct FlowCache {
    inner: Mutex<Inner>,
    capacity: Option<usize>,
}

impl FlowCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: None,
        }
    }

    /// Create a cache holding at most `capacity` graphs; the oldest stored
    /// graph is evicted first. In-flight fetches are never evicted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            capacity: Some(capacity.max(1)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the graph for `key`, running `fetch` only if it is neither
    /// stored nor already being fetched.
    ///
    /// `fetch` is called with the cache lock held and should only build the
    /// future; the work happens when the future is polled.
    pub async fn get_or_fetch<F, Fut>(&self, key: &FlowKey, fetch: F) -> FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JourneyFlow, MoodreelError>> + Send + 'static,
    {
        let (id, fetch) = match self.claim(key, fetch) {
            Claim::Hit(flow) => return Ok(flow),
            Claim::Wait { id, fetch } => (id, fetch),
        };
        let result = fetch.await;
        self.settle(key, id, &result);
        result
    }

    fn claim<F, Fut>(&self, key: &FlowKey, fetch: F) -> Claim
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JourneyFlow, MoodreelError>> + Send + 'static,
    {
        let mut inner = self.lock();
        match inner.slots.get(key) {
            Some(Slot::Ready(flow)) => {
                let flow = flow.clone();
                inner.stats.hits += 1;
                tracing::debug!(key = %key, "journey cache hit");
                return Claim::Hit(flow);
            }
            Some(Slot::Pending { id, fetch }) => {
                let claim = Claim::Wait {
                    id: *id,
                    fetch: fetch.clone(),
                };
                inner.stats.joined += 1;
                tracing::debug!(key = %key, "joining in-flight journey fetch");
                return claim;
            }
            None => {}
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let shared = fetch().map(|result| result.map(Arc::new)).boxed().shared();
        inner.slots.insert(
            key.clone(),
            Slot::Pending {
                id,
                fetch: shared.clone(),
            },
        );
        inner.stats.misses += 1;
        tracing::debug!(key = %key, "journey cache miss, fetching");
        Claim::Wait { id, fetch: shared }
    }

    fn settle(&self, key: &FlowKey, id: u64, result: &FetchResult) {
        let mut inner = self.lock();
        let owns_slot = matches!(
            inner.slots.get(key),
            Some(Slot::Pending { id: pending, .. }) if *pending == id
        );
        if !owns_slot {
            return;
        }
        match result {
            Ok(flow) => {
                inner.slots.insert(key.clone(), Slot::Ready(flow.clone()));
                inner.stored.push_back(key.clone());
                inner.stats.entries += 1;
                tracing::debug!(key = %key, steps = flow.len(), "journey graph cached");
                self.evict_overflow(&mut inner);
            }
            Err(error) => {
                inner.slots.remove(key);
                inner.stats.failures += 1;
                tracing::warn!(key = %key, error = %error, "journey fetch failed; not cached");
            }
        }
    }

    fn evict_overflow(&self, inner: &mut Inner) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while inner.stats.entries > capacity {
            let Some(oldest) = inner.stored.pop_front() else {
                break;
            };
            if let Some(Slot::Ready(_)) = inner.slots.get(&oldest) {
                inner.slots.remove(&oldest);
                inner.stats.entries -= 1;
                tracing::debug!(key = %oldest, "evicted journey graph");
            }
        }
    }

    /// Stored graph for `key`, without fetching.
    pub fn get(&self, key: &FlowKey) -> Option<Arc<JourneyFlow>> {
        match self.lock().slots.get(key) {
            Some(Slot::Ready(flow)) => Some(flow.clone()),
            _ => None,
        }
    }

    pub fn contains(&self, key: &FlowKey) -> bool {
        matches!(self.lock().slots.get(key), Some(Slot::Ready(_)))
    }

    /// Whether a fetch for `key` is in flight.
    pub fn is_pending(&self, key: &FlowKey) -> bool {
        matches!(self.lock().slots.get(key), Some(Slot::Pending { .. }))
    }

    /// Number of stored graphs.
    pub fn len(&self) -> usize {
        self.lock().stats.entries
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the graph stored for `key`. In-flight fetches are left alone.
    pub fn invalidate(&self, key: &FlowKey) -> bool {
        let mut inner = self.lock();
        if !matches!(inner.slots.get(key), Some(Slot::Ready(_))) {
            return false;
        }
        inner.slots.remove(key);
        inner.stored.retain(|k| k != key);
        inner.stats.entries -= 1;
        true
    }

    /// Drop every stored graph and forget in-flight fetches.
    ///
    /// Callers already waiting on a forgotten fetch still receive its
    /// result, but it is not stored.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.slots.clear();
        inner.stored.clear();
        inner.stats.entries = 0;
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl Default for FlowCache {
    fn default() -> Self {
        Self::new()
    }
}
