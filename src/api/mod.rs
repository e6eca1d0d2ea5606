//! API Module
//!
//! HTTP handlers and routing for the reply cache REST API.
//!
//! # Endpoints
//! - `POST /query` - Answer a question, serving from cache when possible
//! - `DELETE /invalidate/:key` - Drop a single cached response
//! - `DELETE /flush` - Drop all cached responses
//! - `GET /stats` - Cache and resource manager statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
