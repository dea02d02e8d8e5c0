//! # Dispatch Metrics
//!
//! Prometheus metrics for watching notification traffic.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! notification-center = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `nc_notifications_posted_total` - Counter of posts, labeled by kind (bare/payload)
//! - `nc_callbacks_invoked_total` - Counter of procedures actually run
//! - `nc_type_mismatches_total` - Counter of posts aborted by a type mismatch
//! - `nc_stale_receivers_total` - Counter of bindings skipped because the receiver was dropped
//! - `nc_bindings_leaked_total` - Counter of bindings still registered at teardown
//! - `nc_bindings_registered` - Gauge of live bindings in the last center touched

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total posts, labeled by kind
    pub static ref NOTIFICATIONS_POSTED: IntCounterVec = register_int_counter_vec!(
        "nc_notifications_posted_total",
        "Total number of notifications posted",
        &["kind"]
    )
    .expect("Failed to create NOTIFICATIONS_POSTED metric");

    /// Total procedures invoked
    pub static ref CALLBACKS_INVOKED: IntCounter = register_int_counter!(
        "nc_callbacks_invoked_total",
        "Total number of callback procedures invoked"
    )
    .expect("Failed to create CALLBACKS_INVOKED metric");

    /// Total type mismatches
    pub static ref TYPE_MISMATCHES: IntCounter = register_int_counter!(
        "nc_type_mismatches_total",
        "Total number of posts aborted by a payload type mismatch"
    )
    .expect("Failed to create TYPE_MISMATCHES metric");

    /// Total stale receivers skipped
    pub static ref STALE_RECEIVERS: IntCounter = register_int_counter!(
        "nc_stale_receivers_total",
        "Total number of bindings skipped because their receiver was dropped"
    )
    .expect("Failed to create STALE_RECEIVERS metric");

    /// Total bindings leaked at teardown
    pub static ref BINDINGS_LEAKED: IntCounter = register_int_counter!(
        "nc_bindings_leaked_total",
        "Total number of bindings still registered at teardown"
    )
    .expect("Failed to create BINDINGS_LEAKED metric");

    /// Live bindings
    pub static ref BINDINGS_REGISTERED: IntGauge = register_int_gauge!(
        "nc_bindings_registered",
        "Number of bindings currently registered"
    )
    .expect("Failed to create BINDINGS_REGISTERED metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a post
#[cfg(feature = "metrics")]
pub fn record_post(with_payload: bool) {
    let kind = if with_payload { "payload" } else { "bare" };
    NOTIFICATIONS_POSTED.with_label_values(&[kind]).inc();
}

/// Record procedures invoked by one post
#[cfg(feature = "metrics")]
pub fn record_invoked(count: usize) {
    CALLBACKS_INVOKED.inc_by(count as u64);
}

/// Record a post aborted by a type mismatch
#[cfg(feature = "metrics")]
pub fn record_type_mismatch() {
    TYPE_MISMATCHES.inc();
}

/// Record a binding skipped for a dropped receiver
#[cfg(feature = "metrics")]
pub fn record_stale_receiver() {
    STALE_RECEIVERS.inc();
}

/// Record bindings leaked at teardown
#[cfg(feature = "metrics")]
pub fn record_leak(count: usize) {
    BINDINGS_LEAKED.inc_by(count as u64);
}

/// Update the live binding gauge
#[cfg(feature = "metrics")]
pub fn set_bindings_registered(count: usize) {
    BINDINGS_REGISTERED.set(i64::try_from(count).unwrap_or(i64::MAX));
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_post(_with_payload: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_invoked(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_type_mismatch() {}

#[cfg(not(feature = "metrics"))]
pub fn record_stale_receiver() {}

#[cfg(not(feature = "metrics"))]
pub fn record_leak(_count: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn set_bindings_registered(_count: usize) {}
