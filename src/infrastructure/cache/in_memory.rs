//! In-memory LRU + TTL response cache

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::debug;

use crate::domain::cache::{CacheStats, Fingerprint, ResponseCache};
use crate::domain::routing::round_to;
use crate::infrastructure::observability::{
    record_cache_eviction, record_cache_hit, record_cache_miss,
};

/// Configuration for the in-memory response cache
#[derive(Debug, Clone, Copy)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries, at least 1
    pub capacity: usize,
    /// Age after which an entry is treated as absent
    pub ttl: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            ttl: Duration::from_secs(1800),
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// TTL given in (possibly fractional) seconds; non-positive values clamp to zero
    pub fn with_ttl_seconds(self, seconds: f64) -> Self {
        let ttl = Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX);
        self.with_ttl(ttl)
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
    // Unbounded; capacity is enforced by hand in `put`
    entries: LruCache<String, CacheEntry<V>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

/// Bounded, thread-safe response cache with strict LRU eviction and
/// lazy TTL expiry.
///
/// All operations run under one mutex. A poisoned lock is recovered rather
/// than surfaced, since every mutation leaves the state consistent.
#[derive(Debug)]
pub struct InMemoryResponseCache<V> {
    state: Mutex<CacheState<V>>,
    ttl: Duration,
}

impl<V: Clone> InMemoryResponseCache<V> {
    pub fn new(config: InMemoryCacheConfig) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: LruCache::unbounded(),
                capacity: config.capacity.max(1),
                hits: 0,
                misses: 0,
            }),
            ttl: config.ttl,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(InMemoryCacheConfig::default())
    }

    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        entry.created_at.elapsed() > self.ttl
    }
}

impl<V: Clone> Default for InMemoryResponseCache<V> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<V> ResponseCache<V> for InMemoryResponseCache<V>
where
    V: Clone + Send + Sync + std::fmt::Debug,
{
    fn get(&self, text: &str, strategy: &str) -> Option<V> {
        let key = Fingerprint::new(text, strategy);
        let mut state = self.lock();

        let expired = match state.entries.peek(key.as_str()) {
            None => {
                state.misses += 1;
                record_cache_miss();
                return None;
            }
            Some(entry) => self.is_expired(entry),
        };

        if expired {
            state.entries.pop(key.as_str());
            state.misses += 1;
            record_cache_miss();
            record_cache_eviction("expired");
            debug!(key = %key, "Cache entry expired");
            return None;
        }

        state.hits += 1;
        record_cache_hit();
        // `get` promotes the entry to most recently used
        state.entries.get(key.as_str()).map(|entry| entry.value.clone())
    }

    fn put(&self, text: &str, strategy: &str, value: V) {
        let key = Fingerprint::new(text, strategy).as_str().to_string();
        let mut state = self.lock();

        state.entries.pop(&key);

        while state.entries.len() >= state.capacity {
            match state.entries.pop_lru() {
                Some((evicted, _)) => {
                    record_cache_eviction("capacity");
                    debug!(key = %evicted, "Evicted least recently used cache entry");
                }
                None => break,
            }
        }

        state.entries.push(
            key,
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.hits = 0;
        state.misses = 0;
    }

    fn stats(&self) -> CacheStats {
        let state = self.lock();
        let lookups = state.hits + state.misses;
        let hit_rate_percent = if lookups == 0 {
            0.0
        } else {
            round_to(state.hits as f64 / lookups as f64 * 100.0, 2)
        };

        CacheStats {
            size: state.entries.len(),
            capacity: state.capacity,
            ttl_seconds: self.ttl.as_secs_f64(),
            hits: state.hits,
            misses: state.misses,
            hit_rate_percent,
        }
    }

    fn resize(&self, capacity: usize) {
        self.lock().capacity = capacity.max(1);
    }
}
