//! Resource Manager Module
//!
//! Lazy loading and lifecycle management for expensive named resources
//! (AI model instances). Construction is singleflight per resource, active
//! use is bounded by a global admission-control budget, and idle instances
//! are evicted to reclaim memory.

mod manager;
mod slot;
mod stats;

// Re-export public types
pub use manager::{ResourceGuard, ResourceManager};
pub use slot::Factory;
pub use stats::ResourceStats;
