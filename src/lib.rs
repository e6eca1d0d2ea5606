//! Reply Cache - response caching and lazy model management for chat services
//!
//! Provides a TTL/LRU response cache plus a resource manager that loads
//! expensive model instances on first demand with singleflight semantics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod resource;
pub mod responder;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_maintenance_task;
