//! Response Cache Store
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL
//! expiration. A miss is an ordinary `None`, never an error, so callers can
//! fall through to the compute path without branching on error kinds.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Response Cache ==
/// In-memory response cache with LRU eviction and TTL support.
#[derive(Debug)]
pub struct ResponseCache {
    /// Fingerprint-to-entry storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Default TTL in seconds for entries stored without an explicit TTL
    default_ttl_secs: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates a new ResponseCache.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold (must be > 0)
    /// * `default_ttl_secs` - Default TTL in seconds
    pub fn new(max_entries: usize, default_ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl_secs,
        }
    }

    // == Get ==
    /// Looks up a cached response by fingerprint.
    ///
    /// Returns `Some(value)` only if the entry exists and has not expired.
    /// A hit refreshes the entry's recency; an expired entry is removed on
    /// the spot and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let lookup = self
            .entries
            .get(key)
            .map(|entry| (entry.is_expired(), entry.value.clone()));

        match lookup {
            Some((true, _)) => {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.set_size(self.entries.len());
                self.stats.record_miss();
                debug!(key, "cache miss (expired)");
                None
            }
            Some((false, value)) => {
                if let Some(entry) = self.entries.get_mut(key) {
                    entry.touch();
                }
                self.lru.touch(key);
                self.stats.record_hit();
                debug!(key, "cache hit");
                Some(value)
            }
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == Set ==
    /// Stores a response under a fingerprint with optional TTL.
    ///
    /// Overwriting an existing key refreshes its lifetime and recency. When
    /// inserting a new key into a full cache, least-recently-used entries
    /// are evicted first, regardless of how much TTL they have left.
    pub fn set(&mut self, key: String, value: String, ttl_secs: Option<u64>) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite {
            while self.entries.len() >= self.max_entries {
                match self.lru.pop_lru() {
                    Some(victim) => {
                        self.entries.remove(&victim);
                        self.stats.record_eviction();
                        debug!(key = %victim, "cache entry evicted (LRU)");
                    }
                    None => break,
                }
            }
        }

        let ttl = ttl_secs.unwrap_or(self.default_ttl_secs);
        let entry = CacheEntry::new(value, ttl);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        self.stats.set_size(self.entries.len());
    }

    // == Invalidate ==
    /// Removes an entry if present. Returns whether anything was removed;
    /// an absent key is not an error.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.set_size(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes all entries. Cumulative counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.set_size(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed. Expiry removal is not counted
    /// as an LRU eviction.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
        }

        self.stats.set_size(self.entries.len());
        count
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
