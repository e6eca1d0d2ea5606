//! API Handlers
//!
//! HTTP request handlers for each endpoint. The query handler is the
//! orchestration path: fingerprint the question, try the cache, and only on
//! a miss acquire the responder, compute, and store the answer.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{fingerprint, ResponseCache};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    FlushResponse, HealthResponse, InvalidateResponse, QueryRequest, QueryResponse, StatsResponse,
};
use crate::resource::ResourceManager;
use crate::responder::{Responder, RESPONDER_NAME};

/// Application state shared across all handlers.
///
/// The cache lives behind an RwLock; the resource manager carries its own
/// internal synchronization and is shared by cheap clone.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Lazy model loader shared by all request tasks
    pub resources: ResourceManager<Responder>,
}

impl AppState {
    /// Creates a new AppState from already constructed components.
    pub fn new(cache: ResponseCache, resources: ResourceManager<Responder>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            resources,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Resource factories are registered by the caller; this only sizes the
    /// cache and the concurrency budget.
    pub fn from_config(config: &Config) -> Self {
        let cache = ResponseCache::new(config.max_cache_entries, config.default_ttl_secs());
        let resources = ResourceManager::new(config.max_concurrent_requests);
        Self::new(cache, resources)
    }
}

/// Handler for POST /query
///
/// Serves a cached answer when one exists; otherwise acquires the responder
/// (loading it on first use), computes the answer, and caches it.
pub async fn query_handler(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ServiceError::InvalidRequest(error_msg));
    }

    let normalized = fingerprint::normalize(&req.text);
    let key = fingerprint::fingerprint(&req.text, req.context.as_deref());

    // Cache first; the lock is held only for the lookup
    if let Some(answer) = state.cache.write().await.get(&key) {
        return Ok(Json(QueryResponse::new(answer, true, key)));
    }

    // Miss: acquire the responder (may suspend on load or admission control)
    let responder = state.resources.acquire(RESPONDER_NAME).await?;
    let answer = responder.answer(&normalized);
    state.resources.release(responder);

    state
        .cache
        .write()
        .await
        .set(key.clone(), answer.clone(), None);

    Ok(Json(QueryResponse::new(answer, false, key)))
}

/// Handler for DELETE /invalidate/:key
///
/// Removes a single cached response. An absent key is not an error; the
/// response just reports that nothing was removed.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.write().await.invalidate(&key);
    Json(InvalidateResponse::new(key, removed))
}

/// Handler for DELETE /flush
///
/// Removes every cached response.
pub async fn flush_handler(State(state): State<AppState>) -> Json<FlushResponse> {
    let mut cache = state.cache.write().await;
    let dropped = cache.len();
    cache.clear();
    Json(FlushResponse::new(dropped))
}

/// Handler for GET /stats
///
/// Returns cache and resource manager statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache_stats = state.cache.read().await.stats();
    let resource_stats = state.resources.stats();
    Json(StatsResponse::new(cache_stats, resource_stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> AppState {
        let state = AppState::new(ResponseCache::new(100, 300), ResourceManager::new(10));
        state
            .resources
            .register(RESPONDER_NAME, Responder::load)
            .unwrap();
        state
    }

    fn query(text: &str) -> QueryRequest {
        QueryRequest {
            text: text.to_string(),
            context: None,
        }
    }

    #[tokio::test]
    async fn test_query_miss_then_hit() {
        let state = test_state();

        let first = query_handler(State(state.clone()), Json(query("what time is check-in")))
            .await
            .unwrap();
        assert!(!first.cached);

        let second = query_handler(State(state.clone()), Json(query("What TIME is check-in?")))
            .await
            .unwrap();
        assert!(second.cached, "Normalized rephrasing should hit the cache");
        assert_eq!(second.answer, first.answer);
    }

    #[tokio::test]
    async fn test_query_empty_text_rejected() {
        let state = test_state();

        let result = query_handler(State(state), Json(query("  "))).await;
        assert!(matches!(result, Err(ServiceError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_query_without_responder_registered() {
        let state = AppState::new(ResponseCache::new(100, 300), ResourceManager::new(10));

        let result = query_handler(State(state), Json(query("hello"))).await;
        assert!(matches!(result, Err(ServiceError::UnknownResource(_))));
    }

    #[tokio::test]
    async fn test_invalidate_roundtrip() {
        let state = test_state();

        let reply = query_handler(State(state.clone()), Json(query("is there wifi")))
            .await
            .unwrap();
        let key = reply.key.clone();

        let removed = invalidate_handler(State(state.clone()), Path(key.clone())).await;
        assert!(removed.removed);

        let again = invalidate_handler(State(state), Path(key)).await;
        assert!(!again.removed, "Second invalidate finds nothing");
    }

    #[tokio::test]
    async fn test_flush_handler() {
        let state = test_state();

        query_handler(State(state.clone()), Json(query("is there parking")))
            .await
            .unwrap();
        query_handler(State(state.clone()), Json(query("breakfast hours")))
            .await
            .unwrap();

        let flushed = flush_handler(State(state.clone())).await;
        assert_eq!(flushed.dropped, 2);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.cache.size, 0);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        query_handler(State(state.clone()), Json(query("pool hours")))
            .await
            .unwrap();

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.cache.size, 1);
        assert_eq!(stats.resources.loaded, 1);
        assert_eq!(stats.resources.total_loads, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
