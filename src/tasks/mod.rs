//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Maintenance: removes expired cache entries and evicts idle model
//!   instances at configured intervals

mod maintenance;

pub use maintenance::spawn_maintenance_task;
