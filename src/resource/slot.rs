//! Resource Slot Module
//!
//! Per-resource bookkeeping: the registered factory, the load state machine,
//! and usage tracking for idle eviction.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

/// Zero-argument constructor for the underlying heavy object.
///
/// Factories run on the blocking thread pool, so they may do CPU-heavy or
/// blocking work (reading model weights from disk, etc.).
pub type Factory<T> = Arc<dyn Fn() -> anyhow::Result<T> + Send + Sync>;

// == Resource State ==
/// Load state machine for a registered resource.
///
/// Eviction happens atomically under the manager lock, so there is no
/// observable intermediate state between `Ready` and `Unloaded`.
#[derive(Debug)]
pub(crate) enum ResourceState<T> {
    /// No instance exists; the next acquire triggers a load
    Unloaded,
    /// A load is in flight; the receiver signals its completion
    Loading(watch::Receiver<bool>),
    /// The instance is live and shared among holders
    Ready(Arc<T>),
}

// == Resource Slot ==
/// Metadata and state for one registered resource.
pub(crate) struct ResourceSlot<T> {
    /// Constructor, invoked once per load transition
    pub factory: Factory<T>,
    /// Current load state
    pub state: ResourceState<T>,
    /// When the instance was last handed out or fully released
    pub last_used_at: Instant,
    /// Number of callers currently holding the instance
    pub in_flight: usize,
    /// Message from the most recent failed load, reported to waiters
    pub last_error: Option<String>,
}

impl<T> ResourceSlot<T> {
    /// Creates an unloaded slot for a newly registered resource.
    pub fn new(factory: Factory<T>) -> Self {
        Self {
            factory,
            state: ResourceState::Unloaded,
            last_used_at: Instant::now(),
            in_flight: 0,
            last_error: None,
        }
    }

    /// Whether the slot currently owns a live instance.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ResourceState::Ready(_))
    }
}
