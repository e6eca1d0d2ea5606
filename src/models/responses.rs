//! Response DTOs for the reply cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::resource::ResourceStats;

/// Response body for the query operation (POST /query)
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    /// The generated or cached answer
    pub answer: String,
    /// Whether the answer came from the cache
    pub cached: bool,
    /// Fingerprint the answer is cached under
    pub key: String,
}

impl QueryResponse {
    /// Creates a new QueryResponse.
    pub fn new(answer: impl Into<String>, cached: bool, key: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            cached,
            key: key.into(),
        }
    }
}

/// Response body for DELETE /invalidate/:key
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// The key that was targeted
    pub key: String,
    /// Whether an entry was actually removed
    pub removed: bool,
}

impl InvalidateResponse {
    /// Creates a new InvalidateResponse.
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Response body for DELETE /flush
#[derive(Debug, Clone, Serialize)]
pub struct FlushResponse {
    /// Success message
    pub message: String,
    /// Number of entries dropped
    pub dropped: usize,
}

impl FlushResponse {
    /// Creates a new FlushResponse.
    pub fn new(dropped: usize) -> Self {
        Self {
            message: "Cache flushed".to_string(),
            dropped,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Response cache counters
    pub cache: CacheStats,
    /// Cache hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Resource manager counters
    pub resources: ResourceStats,
}

impl StatsResponse {
    /// Creates a new StatsResponse from both subsystems' snapshots.
    pub fn new(cache: CacheStats, resources: ResourceStats) -> Self {
        let hit_rate = cache.hit_rate();
        Self {
            cache,
            hit_rate,
            resources,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with the current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_response_serialize() {
        let resp = QueryResponse::new("Check-in starts at 3 PM.", true, "abc123");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"cached\":true"));
        assert!(json.contains("abc123"));
    }

    #[test]
    fn test_invalidate_response_serialize() {
        let resp = InvalidateResponse::new("abc123", false);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"removed\":false"));
    }

    #[test]
    fn test_flush_response_serialize() {
        let resp = FlushResponse::new(12);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"dropped\":12"));
    }

    #[test]
    fn test_stats_response_hit_rate() {
        let mut cache = CacheStats::new();
        for _ in 0..8 {
            cache.record_hit();
        }
        for _ in 0..2 {
            cache.record_miss();
        }
        let resp = StatsResponse::new(cache, ResourceStats::default());
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
