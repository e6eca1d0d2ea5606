//! Resource Manager
//!
//! Coordinates lazy construction, sharing, and eviction of heavy resources.
//!
//! Construction is singleflight per resource name: while a load is in
//! flight every acquirer for that name waits on the same completion signal
//! and shares the resulting instance or failure. A global fair semaphore
//! bounds how many holds are active at once across all resources. A single
//! internal mutex guards all bookkeeping; it is never held across an await
//! point, and factories run on the blocking thread pool.

use std::collections::HashMap;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tokio::sync::{watch, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info, warn};

use crate::error::{Result, ServiceError};
use crate::resource::slot::{ResourceSlot, ResourceState};
use crate::resource::{Factory, ResourceStats};

// == Inner State ==
/// All mutable manager state, behind the single internal mutex.
struct Inner<T> {
    slots: HashMap<String, ResourceSlot<T>>,
    total_loads: u64,
    evictions: u64,
}

// == Resource Manager ==
/// Registry of lazily loaded resources with global admission control.
///
/// Cloning is cheap and shares the same underlying state, so one manager
/// can be handed to every request-handling task.
pub struct ResourceManager<T> {
    inner: Arc<Mutex<Inner<T>>>,
    /// Fair (FIFO) admission-control budget over active holds
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
}

impl<T> Clone for ResourceManager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            semaphore: self.semaphore.clone(),
            max_concurrent: self.max_concurrent,
        }
    }
}

impl<T: Send + Sync + 'static> ResourceManager<T> {
    // == Constructor ==
    /// Creates a new manager with the given global concurrency budget.
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                slots: HashMap::new(),
                total_loads: 0,
                evictions: 0,
            })),
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().expect("resource manager lock poisoned")
    }

    // == Register ==
    /// Records a resource factory under a unique name.
    ///
    /// The factory is not invoked here; the first `acquire` (or an explicit
    /// `warm_up`) triggers construction.
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Result<()>
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut inner = self.lock_inner();

        if inner.slots.contains_key(&name) {
            return Err(ServiceError::DuplicateResource(name));
        }

        info!(resource = %name, "resource registered");
        inner.slots.insert(name, ResourceSlot::new(Arc::new(factory)));
        Ok(())
    }

    // == Acquire ==
    /// Obtains a shared handle to a resource, loading it if necessary.
    ///
    /// Suspends while waiting for a free admission slot or for an
    /// in-progress load of the same resource. Both waits are cancel-safe:
    /// dropping the future removes this caller without disturbing other
    /// waiters or the load itself.
    pub async fn acquire(&self, name: &str) -> Result<ResourceGuard<T>> {
        // Unknown names fail fast, before consuming an admission slot.
        if !self.lock_inner().slots.contains_key(name) {
            return Err(ServiceError::UnknownResource(name.to_string()));
        }

        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ServiceError::Internal("admission semaphore closed".to_string()))?;

        loop {
            // Decide the next step under the lock, then act on it without it.
            let mut completion = {
                let mut inner = self.lock_inner();
                let slot = match inner.slots.get_mut(name) {
                    Some(slot) => slot,
                    None => {
                        return Err(ServiceError::UnknownResource(name.to_string()));
                    }
                };

                match &slot.state {
                    ResourceState::Ready(instance) => {
                        let instance = instance.clone();
                        slot.in_flight += 1;
                        slot.last_used_at = Instant::now();
                        debug!(resource = %name, in_flight = slot.in_flight, "resource handed out");
                        return Ok(self.make_guard(name, instance, permit));
                    }
                    ResourceState::Loading(rx) => rx.clone(),
                    ResourceState::Unloaded => {
                        let (tx, rx) = watch::channel(false);
                        slot.state = ResourceState::Loading(rx.clone());
                        slot.last_error = None;
                        self.spawn_load(name.to_string(), slot.factory.clone(), tx);
                        rx
                    }
                }
            };

            // Wait for the in-flight load to resolve, then re-inspect the
            // slot. A closed channel means the commit already ran, so the
            // re-check below covers that case too.
            let _ = completion.changed().await;

            let mut inner = self.lock_inner();
            let slot = match inner.slots.get_mut(name) {
                Some(slot) => slot,
                None => {
                    return Err(ServiceError::UnknownResource(name.to_string()));
                }
            };

            match &slot.state {
                ResourceState::Ready(instance) => {
                    let instance = instance.clone();
                    slot.in_flight += 1;
                    slot.last_used_at = Instant::now();
                    return Ok(self.make_guard(name, instance, permit));
                }
                ResourceState::Unloaded => {
                    match slot.last_error.clone() {
                        // The load we waited on failed; report it. The next
                        // acquire performs a fresh attempt.
                        Some(message) => {
                            return Err(ServiceError::LoadFailed {
                                name: name.to_string(),
                                message,
                            });
                        }
                        // No recorded failure: the load succeeded but the
                        // instance was evicted before we re-took the lock.
                        // Start over rather than surfacing a phantom error.
                        None => continue,
                    }
                }
                // Another caller already started a fresh load; wait on it.
                ResourceState::Loading(_) => continue,
            }
        }
    }

    /// Runs the factory on the blocking pool and commits the outcome.
    ///
    /// Detached from the acquiring task, so cancelling the initiator does
    /// not abandon waiters mid-load.
    fn spawn_load(&self, name: String, factory: Factory<T>, tx: watch::Sender<bool>) {
        let inner = self.inner.clone();
        tokio::spawn(async move {
            info!(resource = %name, "loading resource");
            let started = Instant::now();

            let outcome = tokio::task::spawn_blocking(move || factory()).await;
            let result = match outcome {
                Ok(result) => result,
                Err(join_err) => Err(anyhow::anyhow!("factory panicked: {join_err}")),
            };

            {
                let mut guard = inner.lock().expect("resource manager lock poisoned");
                match result {
                    Ok(instance) => {
                        guard.total_loads += 1;
                        if let Some(slot) = guard.slots.get_mut(&name) {
                            slot.state = ResourceState::Ready(Arc::new(instance));
                            // The idle clock starts at the commit, not at
                            // whatever preceded the load.
                            slot.last_used_at = Instant::now();
                        }
                        info!(
                            resource = %name,
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            "resource loaded"
                        );
                    }
                    Err(err) => {
                        if let Some(slot) = guard.slots.get_mut(&name) {
                            slot.state = ResourceState::Unloaded;
                            slot.last_error = Some(err.to_string());
                        }
                        warn!(resource = %name, error = %err, "resource load failed");
                    }
                }
            }

            let _ = tx.send(true);
        });
    }

    fn make_guard(
        &self,
        name: &str,
        instance: Arc<T>,
        permit: OwnedSemaphorePermit,
    ) -> ResourceGuard<T> {
        ResourceGuard {
            name: name.to_string(),
            instance,
            inner: self.inner.clone(),
            _permit: permit,
        }
    }

    // == Release ==
    /// Returns a handle, freeing its admission slot and marking the
    /// resource idle once the last holder is gone.
    ///
    /// Equivalent to dropping the guard; provided for callers that want the
    /// release to be explicit.
    pub fn release(&self, guard: ResourceGuard<T>) {
        drop(guard);
    }

    // == Warm Up ==
    /// Loads every registered resource now instead of on first demand.
    ///
    /// Used at startup when lazy loading is disabled. Stops at the first
    /// failure so a broken factory surfaces immediately.
    pub async fn warm_up(&self) -> Result<()> {
        let names: Vec<String> = self.lock_inner().slots.keys().cloned().collect();

        for name in names {
            let guard = self.acquire(&name).await?;
            self.release(guard);
        }
        Ok(())
    }

    // == Evict Idle ==
    /// Unloads every ready resource with no active holders that has been
    /// idle for at least `threshold`. Returns the number evicted.
    pub fn evict_idle(&self, threshold: Duration) -> usize {
        let mut inner = self.lock_inner();
        let mut evicted = 0;

        for (name, slot) in inner.slots.iter_mut() {
            if slot.is_loaded() && slot.in_flight == 0 && slot.last_used_at.elapsed() >= threshold
            {
                slot.state = ResourceState::Unloaded;
                evicted += 1;
                info!(resource = %name, "resource evicted (idle)");
            }
        }

        inner.evictions += evicted as u64;
        evicted
    }

    // == Stats ==
    /// Returns a snapshot of manager state and counters.
    pub fn stats(&self) -> ResourceStats {
        let inner = self.lock_inner();
        ResourceStats {
            registered: inner.slots.len(),
            loaded: inner.slots.values().filter(|s| s.is_loaded()).count(),
            in_flight: inner.slots.values().map(|s| s.in_flight).sum(),
            total_loads: inner.total_loads,
            evictions: inner.evictions,
        }
    }

    // == Max Concurrent ==
    /// The configured global concurrency budget.
    #[allow(dead_code)]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}

// == Resource Guard ==
/// Shared handle to a loaded resource.
///
/// Dereferences to the underlying instance. Dropping the guard releases the
/// hold: the per-resource in-flight count goes down, the idle clock restarts
/// once it reaches zero, and one admission slot frees up, waking the oldest
/// suspended acquirer.
pub struct ResourceGuard<T> {
    name: String,
    instance: Arc<T>,
    inner: Arc<Mutex<Inner<T>>>,
    _permit: OwnedSemaphorePermit,
}

impl<T> ResourceGuard<T> {
    /// Name of the resource this guard belongs to.
    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clones the shared instance pointer, e.g. for identity checks.
    #[allow(dead_code)]
    pub fn instance(&self) -> Arc<T> {
        self.instance.clone()
    }
}

// Manual impl: deriving would require `T: Debug`, and the instance itself
// is not interesting here.
impl<T> std::fmt::Debug for ResourceGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuard")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> Deref for ResourceGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.instance
    }
}

impl<T> Drop for ResourceGuard<T> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            if let Some(slot) = inner.slots.get_mut(&self.name) {
                slot.in_flight = slot.in_flight.saturating_sub(1);
                if slot.in_flight == 0 {
                    slot.last_used_at = Instant::now();
                }
            }
        }
        // The admission permit is returned when `_permit` drops.
    }
}
