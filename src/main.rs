//! Reply Cache - response caching and lazy model management server
//!
//! Serves chat answers from a TTL/LRU response cache, loading the answer
//! model on first demand under a global concurrency budget.

mod api;
mod cache;
mod config;
mod error;
mod models;
mod resource;
mod responder;
mod tasks;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use responder::{Responder, RESPONDER_NAME};
use tasks::spawn_maintenance_task;

/// Main entry point for the reply cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create cache store and resource manager with configured parameters
/// 4. Register the responder factory (eagerly loading it if lazy loading
///    is disabled)
/// 5. Start the background maintenance task
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reply_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reply Cache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: ttl={}h, max_entries={}, max_concurrent={}, idle_eviction={}s, lazy_load={}, port={}",
        config.cache_ttl_hours,
        config.max_cache_entries,
        config.max_concurrent_requests,
        config.idle_eviction_secs,
        config.lazy_load,
        config.server_port
    );

    // Create application state with cache and resource manager
    let state = AppState::from_config(&config);
    state
        .resources
        .register(RESPONDER_NAME, Responder::load)
        .expect("responder registration on a fresh manager cannot collide");

    if config.lazy_load {
        info!("Lazy loading enabled; responder loads on first query");
    } else {
        info!("Lazy loading disabled; loading responder now");
        if let Err(err) = state.resources.warm_up().await {
            warn!("Eager load failed, falling back to on-demand loading: {err}");
        }
    }

    // Start background maintenance task
    let maintenance_handle = spawn_maintenance_task(
        state.cache.clone(),
        state.resources.clone(),
        config.maintenance_interval,
        Duration::from_secs(config.idle_eviction_secs),
    );
    info!("Background maintenance task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(maintenance_handle))
        .await
        .unwrap();

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the maintenance task and allows graceful shutdown.
async fn shutdown_signal(maintenance_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the maintenance task
    maintenance_handle.abort();
    warn!("Maintenance task aborted");
}
