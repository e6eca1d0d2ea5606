//! Resource Statistics Module
//!
//! Usage counters for the resource manager.

use serde::Serialize;

// == Resource Stats ==
/// Snapshot of resource manager state and cumulative counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceStats {
    /// Number of registered resources
    pub registered: usize,
    /// Number of resources currently holding a live instance
    pub loaded: usize,
    /// Total in-flight holds across all resources
    pub in_flight: usize,
    /// Cumulative successful factory invocations
    pub total_loads: u64,
    /// Cumulative idle evictions
    pub evictions: u64,
}
