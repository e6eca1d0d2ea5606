//! Response Cache Module
//!
//! Provides in-memory response caching with TTL expiration and LRU eviction.
//! Keys are opaque fingerprints produced by the `fingerprint` submodule;
//! the store itself does exact string matching only.

mod entry;
pub mod fingerprint;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::ResponseCache;
