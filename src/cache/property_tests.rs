//! Property-Based Tests for the Response Cache
//!
//! Uses proptest to verify the cache invariants under arbitrary operation
//! sequences.

use proptest::prelude::*;

use crate::cache::fingerprint::{fingerprint, normalize};
use crate::cache::ResponseCache;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;
const TEST_DEFAULT_TTL: u64 = 300;

// == Strategies ==
/// Generates cache keys from a small alphabet so sequences collide often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9]{1,8}".prop_map(|s| s)
}

/// Generates response values.
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,128}".prop_map(|s| s)
}

/// A single cache operation for sequence testing.
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, hit/miss counters match what the caller
    // observed and the reported size matches the actual entry count.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut cache = ResponseCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key, value, None);
                }
                CacheOp::Get { key } => {
                    match cache.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Invalidate { key } => {
                    let _ = cache.invalidate(&key);
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, cache.len(), "Size mismatch");
    }

    // For any key-value pair, storing then reading (before expiry) returns
    // the exact stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut cache = ResponseCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        cache.set(key.clone(), value.clone(), None);

        prop_assert_eq!(cache.get(&key), Some(value), "Round-trip value mismatch");
    }

    // For any stored key, invalidate makes a subsequent get a miss.
    #[test]
    fn prop_invalidate_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut cache = ResponseCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        cache.set(key.clone(), value, None);
        prop_assert!(cache.get(&key).is_some(), "Key should exist before invalidate");

        prop_assert!(cache.invalidate(&key), "Invalidate should report removal");
        prop_assert!(cache.get(&key).is_none(), "Key should be gone after invalidate");
    }

    // For any key, a second set wins: get returns the last stored value and
    // exactly one entry exists for the key.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        v1 in value_strategy(),
        v2 in value_strategy(),
    ) {
        let mut cache = ResponseCache::new(TEST_MAX_ENTRIES, TEST_DEFAULT_TTL);

        cache.set(key.clone(), v1, None);
        let len_before = cache.len();
        cache.set(key.clone(), v2.clone(), None);

        prop_assert_eq!(cache.len(), len_before, "Overwrite must not grow the cache");
        prop_assert_eq!(cache.get(&key), Some(v2), "Get must return the last value");
    }

    // For any operation sequence against a small cache, occupancy never
    // exceeds the configured maximum.
    #[test]
    fn prop_capacity_never_exceeded(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let max = 5;
        let mut cache = ResponseCache::new(max, TEST_DEFAULT_TTL);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => cache.set(key, value, None),
                CacheOp::Get { key } => { let _ = cache.get(&key); }
                CacheOp::Invalidate { key } => { let _ = cache.invalidate(&key); }
            }
            prop_assert!(cache.len() <= max, "Cache exceeded its capacity");
        }
    }

    // Fingerprints are insensitive to case and whitespace variation.
    #[test]
    fn prop_fingerprint_normalization(words in prop::collection::vec("[a-z]{1,8}", 1..6)) {
        let plain = words.join(" ");
        let noisy = words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("   ");

        prop_assert_eq!(normalize(&plain), normalize(&noisy));
        prop_assert_eq!(fingerprint(&plain, None), fingerprint(&noisy, None));
    }
}
