//! # Notification Center
//!
//! The façade components use to register, post, and remove.
//!
//! ## Dispatch discipline
//!
//! A post takes a snapshot of the bindings for its name while holding the
//! registry lock, releases the lock, then walks the snapshot in registration
//! order. Procedures may therefore register, post, or remove from inside a
//! callback:
//!
//! - bindings added during a dispatch are not invoked by that dispatch
//! - bindings removed during a dispatch are skipped if not yet reached
//!
//! Bare posts skip typed bindings silently. Payload posts skip bare bindings
//! silently and stop at the first type mismatch.

use crate::binding::{BindingId, CallbackBinding, Invocation};
use crate::config::{CenterConfig, LeakPolicy};
use crate::errors::{ConfigError, DispatchError};
use crate::identity::ObserverId;
use crate::metrics;
use crate::name::NotificationName;
use crate::payload::Payload;
use crate::registry::Registry;
use parking_lot::Mutex;
use serde::Serialize;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Counters since the center was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CenterStats {
    /// Posts of either kind.
    pub posts: u64,
    /// Procedures that actually ran.
    pub deliveries: u64,
    /// Payload posts aborted by a type mismatch.
    pub type_mismatches: u64,
    /// Bindings skipped because their receiver was dropped.
    pub stale_receivers: u64,
    /// Bindings registered right now.
    pub bindings: usize,
    /// Distinct observers registered right now.
    pub observers: usize,
}

/// What teardown found still registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub leaked_bindings: usize,
    pub leaked_observers: Vec<ObserverId>,
}

impl TeardownReport {
    /// Every observer had deregistered.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.leaked_bindings == 0
    }
}

#[derive(Default)]
struct Counters {
    posts: AtomicU64,
    deliveries: AtomicU64,
    type_mismatches: AtomicU64,
    stale_receivers: AtomicU64,
}

/// Name-keyed, type-checked callback dispatch.
pub struct NotificationCenter {
    /// Live bindings. Held only for registry operations, never across a callback.
    registry: Mutex<Registry>,

    /// Next binding id.
    next_id: AtomicU64,

    config: CenterConfig,

    counters: Counters,
}

impl NotificationCenter {
    /// Create a center with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::build(CenterConfig::default())
    }

    /// Create a center with the given configuration.
    ///
    /// # Errors
    ///
    /// The configuration fails validation.
    pub fn with_config(config: CenterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CenterConfig) -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            next_id: AtomicU64::new(1),
            config,
            counters: Counters::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CenterConfig {
        &self.config
    }

    // =========================================================================
    // REGISTRATION
    // =========================================================================

    /// Register a procedure that takes no payload.
    pub fn register_bare<R, F>(
        &self,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> BindingId
    where
        R: Send + Sync + 'static,
        F: Fn(&R) + Send + Sync + 'static,
    {
        let id = self.next_binding_id();
        self.insert(CallbackBinding::bare(id, observer, name, receiver, procedure))
    }

    /// Register a procedure that takes a `V` by value.
    pub fn register_value<R, V, F>(
        &self,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> BindingId
    where
        R: Send + Sync + 'static,
        V: Any + Clone + Send + Sync,
        F: Fn(&R, V) + Send + Sync + 'static,
    {
        let id = self.next_binding_id();
        self.insert(CallbackBinding::by_value(
            id, observer, name, receiver, procedure,
        ))
    }

    /// Register a procedure that borrows the pointee of a pointer payload.
    pub fn register_pointer<R, V, F>(
        &self,
        observer: ObserverId,
        name: impl Into<NotificationName>,
        receiver: &Arc<R>,
        procedure: F,
    ) -> BindingId
    where
        R: Send + Sync + 'static,
        V: Any + Send + Sync,
        F: Fn(&R, &V) + Send + Sync + 'static,
    {
        let id = self.next_binding_id();
        self.insert(CallbackBinding::by_pointer(
            id, observer, name, receiver, procedure,
        ))
    }

    fn next_binding_id(&self) -> BindingId {
        BindingId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, binding: CallbackBinding) -> BindingId {
        let id = binding.id();
        let observer = binding.observer();
        let name = binding.name().clone();
        let shape = binding.shape();

        let count = {
            let mut registry = self.registry.lock();
            registry.append(binding);
            registry.len()
        };
        metrics::set_bindings_registered(count);

        debug!(
            center = %self.config.label,
            binding = %id,
            observer = %observer,
            name = %name,
            shape = %shape,
            "Binding registered"
        );
        id
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Invoke every bare binding for `name`, in registration order.
    ///
    /// Typed bindings are not addressed by a bare post and are skipped.
    ///
    /// # Returns
    ///
    /// The number of procedures that ran.
    pub fn post_notification(&self, name: &str) -> usize {
        self.counters.posts.fetch_add(1, Ordering::Relaxed);
        metrics::record_post(false);

        let snapshot = self.snapshot(name);
        let mut invoked = 0;

        for binding in &snapshot {
            if !binding.shape().is_none() || !binding.is_live() {
                continue;
            }
            match binding.invoke_bare() {
                Ok(outcome) => invoked += self.account(binding, outcome),
                Err(err) => {
                    error!(
                        center = %self.config.label,
                        binding = %binding.id(),
                        name = %name,
                        error = %err,
                        "Bare binding rejected bare post"
                    );
                    debug_assert!(false, "bare binding rejected bare post: {err}");
                }
            }
        }

        self.finish_post(name, snapshot.len(), invoked);
        invoked
    }

    /// Deliver `value` by value to every typed binding for `name`.
    ///
    /// # Errors
    ///
    /// `DispatchError::TypeMismatch` at the first binding whose registered
    /// type is not exactly `V`. Bindings after it are not invoked.
    pub fn post_notification_with_object<V>(
        &self,
        name: &str,
        value: V,
    ) -> Result<usize, DispatchError>
    where
        V: Any + Send + Sync,
    {
        self.post_notification_with_payload(name, &Payload::value(value))
    }

    /// Deliver a shared pointer to every typed binding for `name`.
    ///
    /// # Errors
    ///
    /// See [`NotificationCenter::post_notification_with_payload`].
    pub fn post_notification_with_pointer<V>(
        &self,
        name: &str,
        pointer: Arc<V>,
    ) -> Result<usize, DispatchError>
    where
        V: Any + Send + Sync,
    {
        self.post_notification_with_payload(name, &Payload::pointer(pointer))
    }

    /// Deliver `payload` to every typed binding for `name`, in registration
    /// order. Bare bindings are skipped.
    ///
    /// # Errors
    ///
    /// `DispatchError::TypeMismatch` at the first binding whose registered
    /// shape differs from the payload's. The error carries the number of
    /// procedures that ran before it.
    pub fn post_notification_with_payload(
        &self,
        name: &str,
        payload: &Payload,
    ) -> Result<usize, DispatchError> {
        self.counters.posts.fetch_add(1, Ordering::Relaxed);
        metrics::record_post(true);

        let snapshot = self.snapshot(name);
        let mut invoked = 0;

        for binding in &snapshot {
            if binding.shape().is_none() || !binding.is_live() {
                continue;
            }
            match binding.invoke_with_payload(payload) {
                Ok(outcome) => invoked += self.account(binding, outcome),
                Err(err) => {
                    self.counters.type_mismatches.fetch_add(1, Ordering::Relaxed);
                    self.counters
                        .deliveries
                        .fetch_add(invoked as u64, Ordering::Relaxed);
                    metrics::record_type_mismatch();
                    metrics::record_invoked(invoked);
                    error!(
                        center = %self.config.label,
                        binding = %binding.id(),
                        name = %name,
                        expected = %binding.shape(),
                        found = %payload.shape(),
                        delivered = invoked,
                        "Payload type mismatch, dispatch aborted"
                    );
                    return Err(err.with_delivered(invoked));
                }
            }
        }

        self.finish_post(name, snapshot.len(), invoked);
        Ok(invoked)
    }

    fn snapshot(&self, name: &str) -> Vec<Arc<CallbackBinding>> {
        self.registry.lock().snapshot_for_name(name)
    }

    /// 1 if the procedure ran.
    fn account(&self, binding: &CallbackBinding, outcome: Invocation) -> usize {
        match outcome {
            Invocation::Delivered => {
                trace!(binding = %binding.id(), name = %binding.name(), "Delivered");
                1
            }
            Invocation::ReceiverGone => {
                self.counters.stale_receivers.fetch_add(1, Ordering::Relaxed);
                metrics::record_stale_receiver();
                warn!(
                    center = %self.config.label,
                    binding = %binding.id(),
                    observer = %binding.observer(),
                    name = %binding.name(),
                    "Receiver dropped without removing its bindings"
                );
                0
            }
            Invocation::Retired => {
                trace!(binding = %binding.id(), "Skipped removed binding");
                0
            }
        }
    }

    fn finish_post(&self, name: &str, matched: usize, invoked: usize) {
        self.counters
            .deliveries
            .fetch_add(invoked as u64, Ordering::Relaxed);
        metrics::record_invoked(invoked);

        if matched == 0 && self.config.log_unhandled {
            warn!(center = %self.config.label, name = %name, "Notification has no bindings");
        }
        trace!(
            center = %self.config.label,
            name = %name,
            matched,
            invoked,
            "Notification dispatched"
        );
    }

    // =========================================================================
    // REMOVAL
    // =========================================================================

    /// Remove every binding owned by `observer`.
    ///
    /// Safe to call speculatively: zero matches is a normal result.
    ///
    /// A post running on another thread may already have passed the
    /// liveness check for one of these bindings, so its procedure can still
    /// run once after this returns. The receiver stays alive for that call
    /// through the upgraded `Weak`. Removal from inside a callback on the
    /// same thread has no such window.
    pub fn remove_observer(&self, observer: ObserverId) -> usize {
        let (removed, remaining) = {
            let mut registry = self.registry.lock();
            let removed = registry.remove_by_identity(observer);
            (removed, registry.len())
        };
        self.after_removal(removed, remaining);
        debug!(center = %self.config.label, observer = %observer, removed, "Observer removed");
        removed
    }

    /// Remove the bindings `observer` holds for one name.
    pub fn remove_observer_for_name(&self, observer: ObserverId, name: &str) -> usize {
        let (removed, remaining) = {
            let mut registry = self.registry.lock();
            let removed = registry.remove_by_identity_and_name(observer, name);
            (removed, registry.len())
        };
        self.after_removal(removed, remaining);
        debug!(
            center = %self.config.label,
            observer = %observer,
            name = %name,
            removed,
            "Observer removed for name"
        );
        removed
    }

    /// Remove one binding by id.
    pub fn remove_binding(&self, id: BindingId) -> bool {
        let (removed, remaining) = {
            let mut registry = self.registry.lock();
            let removed = registry.remove_binding(id);
            (removed, registry.len())
        };
        self.after_removal(usize::from(removed), remaining);
        debug!(center = %self.config.label, binding = %id, removed, "Binding removal");
        removed
    }

    fn after_removal(&self, removed: usize, remaining: usize) {
        if removed > 0 {
            metrics::set_bindings_registered(remaining);
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether `observer` has at least one live binding.
    #[must_use]
    pub fn contains_observer(&self, observer: ObserverId) -> bool {
        self.registry.lock().contains_identity(observer)
    }

    /// Whether any binding is registered for `name`.
    #[must_use]
    pub fn has_observers_for(&self, name: &str) -> bool {
        self.registry.lock().contains_name(name)
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.registry.lock().len()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.registry.lock().observers().len()
    }

    #[must_use]
    pub fn stats(&self) -> CenterStats {
        let (bindings, observers) = {
            let registry = self.registry.lock();
            (registry.len(), registry.observers().len())
        };
        CenterStats {
            posts: self.counters.posts.load(Ordering::Relaxed),
            deliveries: self.counters.deliveries.load(Ordering::Relaxed),
            type_mismatches: self.counters.type_mismatches.load(Ordering::Relaxed),
            stale_receivers: self.counters.stale_receivers.load(Ordering::Relaxed),
            bindings,
            observers,
        }
    }

    // =========================================================================
    // TEARDOWN
    // =========================================================================

    /// Destroy every remaining binding and report what was left behind.
    ///
    /// Remaining bindings mean an observer never deregistered. They are
    /// reported through the configured [`LeakPolicy`]; this never fails.
    pub fn teardown(&self) -> TeardownReport {
        let report = {
            let mut registry = self.registry.lock();
            let leaked_observers = registry.observers();
            let leaked_bindings = registry.drain();
            TeardownReport {
                leaked_bindings,
                leaked_observers,
            }
        };
        metrics::set_bindings_registered(0);

        if !report.is_clean() {
            self.report_leak(&report, true);
        }
        report
    }

    fn report_leak(&self, report: &TeardownReport, allow_assert: bool) {
        metrics::record_leak(report.leaked_bindings);

        if self.config.leak_policy == LeakPolicy::Ignore {
            return;
        }
        error!(
            center = %self.config.label,
            leaked_bindings = report.leaked_bindings,
            leaked_observers = ?report.leaked_observers,
            "Bindings still registered at teardown"
        );
        if allow_assert && self.config.leak_policy == LeakPolicy::Assert {
            debug_assert!(
                report.is_clean(),
                "{} binding(s) still registered at teardown",
                report.leaked_bindings
            );
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("label", &self.config.label)
            .field("bindings", &self.binding_count())
            .finish_non_exhaustive()
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        // Empty after teardown unless something registered since
        let registry = self.registry.get_mut();
        if registry.is_empty() {
            return;
        }
        let report = TeardownReport {
            leaked_observers: registry.observers(),
            leaked_bindings: registry.drain(),
        };
        // Never assert from drop
        self.report_leak(&report, false);
    }
}
