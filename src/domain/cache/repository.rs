//! Response cache trait definition

use std::fmt::Debug;

use serde::Serialize;

/// Point-in-time cache statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub ttl_seconds: f64,
    pub hits: u64,
    pub misses: u64,
    /// hits / (hits + misses) as a percentage, 0.0 before any lookup
    pub hit_rate_percent: f64,
}

/// Bounded response cache keyed by request text and classifier strategy.
///
/// Every operation is total: implementations never fail for well-formed
/// input and never block on I/O.
pub trait ResponseCache<V>: Send + Sync + Debug {
    /// Looks up a value, counting a hit or a miss
    fn get(&self, text: &str, strategy: &str) -> Option<V>;

    /// Stores a value as the most recently used entry
    fn put(&self, text: &str, strategy: &str, value: V);

    /// Removes every entry and resets the hit/miss counters
    fn clear(&self);

    /// Returns a consistent snapshot of the cache statistics
    fn stats(&self) -> CacheStats;

    /// Changes the capacity; excess entries are evicted on the next `put`
    fn resize(&self, capacity: usize);
}
