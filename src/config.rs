//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default response TTL in hours
    pub cache_ttl_hours: u64,
    /// Maximum number of entries the response cache can hold
    pub max_cache_entries: usize,
    /// Maximum number of concurrently active resource acquisitions
    pub max_concurrent_requests: usize,
    /// Idle time in seconds after which a loaded resource is evictable
    pub idle_eviction_secs: u64,
    /// When false, registered resources are loaded eagerly at startup
    pub lazy_load: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Background maintenance task interval in seconds
    pub maintenance_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Zero values for capacities are rejected here, once, so the cache and
    /// resource manager never see a degenerate configuration.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_HOURS` - Default response TTL in hours (default: 24)
    /// - `MAX_CACHE_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `MAX_CONCURRENT_REQUESTS` - Concurrency budget (default: 10)
    /// - `IDLE_EVICTION_SECS` - Idle eviction threshold (default: 600)
    /// - `LAZY_LOAD` - Defer model loading to first use (default: true)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAINTENANCE_INTERVAL` - Maintenance frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_hours: env::var("CACHE_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(24),
            max_cache_entries: env::var("MAX_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(1000),
            max_concurrent_requests: env::var("MAX_CONCURRENT_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(10),
            idle_eviction_secs: env::var("IDLE_EVICTION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            lazy_load: env::var("LAZY_LOAD")
                .ok()
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            maintenance_interval: env::var("MAINTENANCE_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }

    /// Default TTL as seconds, for the cache store.
    pub fn default_ttl_secs(&self) -> u64 {
        self.cache_ttl_hours * 3600
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl_hours: 24,
            max_cache_entries: 1000,
            max_concurrent_requests: 10,
            idle_eviction_secs: 600,
            lazy_load: true,
            server_port: 3000,
            maintenance_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_hours, 24);
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.max_concurrent_requests, 10);
        assert_eq!(config.idle_eviction_secs, 600);
        assert!(config.lazy_load);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.maintenance_interval, 60);
    }

    #[test]
    fn test_default_ttl_secs() {
        let config = Config::default();
        assert_eq!(config.default_ttl_secs(), 24 * 3600);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("CACHE_TTL_HOURS");
        env::remove_var("MAX_CACHE_ENTRIES");
        env::remove_var("MAX_CONCURRENT_REQUESTS");
        env::remove_var("IDLE_EVICTION_SECS");
        env::remove_var("LAZY_LOAD");
        env::remove_var("SERVER_PORT");
        env::remove_var("MAINTENANCE_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl_hours, 24);
        assert_eq!(config.max_cache_entries, 1000);
        assert_eq!(config.max_concurrent_requests, 10);
        assert!(config.lazy_load);
    }
}
