//! Query Fingerprinting
//!
//! Turns free-form user text into a stable cache key: lowercase, strip
//! punctuation, collapse whitespace, then hash. An optional context tag
//! (e.g. a detected intent) is mixed into the key so the same wording can
//! cache different answers under different contexts.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// == Normalize ==
/// Canonicalizes query text for fingerprinting.
///
/// Lowercases, drops punctuation and symbols, and collapses all runs of
/// whitespace to a single space.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

// == Fingerprint ==
/// Produces the cache key for a query, optionally scoped by a context tag.
///
/// Keys are only compared for exact equality within a single process, so a
/// non-cryptographic hash is sufficient.
pub fn fingerprint(text: &str, context: Option<&str>) -> String {
    let normalized = normalize(text);

    let mut hasher = DefaultHasher::new();
    normalized.hash(&mut hasher);
    if let Some(tag) = context {
        tag.hash(&mut hasher);
    }

    format!("{:016x}", hasher.finish())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_collapses() {
        assert_eq!(
            normalize("  What TIME   is\tcheck-in? "),
            "what time is check in"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n "), "");
    }

    #[test]
    fn test_fingerprint_is_case_and_spacing_insensitive() {
        let a = fingerprint("What time is check-in?", None);
        let b = fingerprint("what   time is CHECK-IN", None);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_differs_for_different_text() {
        let a = fingerprint("what time is check-in", None);
        let b = fingerprint("what time is check-out", None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_context_tag_discriminates() {
        let plain = fingerprint("how much is a room", None);
        let priced = fingerprint("how much is a room", Some("prices"));
        assert_ne!(plain, priced);
    }

    #[test]
    fn test_fingerprint_is_fixed_width_hex() {
        let key = fingerprint("any question at all", None);
        assert_eq!(key.len(), 16);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
