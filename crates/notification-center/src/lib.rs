//! # Notification Center - Typed In-Process Notification Dispatch
//!
//! Lets independent components talk to each other through named
//! notifications instead of direct references.
//!
//! ## Rules
//!
//! - Observers register a callback per (identity, name, receiver) at setup time
//! - Producers post by name, with or without a payload
//! - Payloads are delivered only to bindings registered for exactly that type
//! - Owners remove their bindings by identity before the receiver goes away
//!
//! ## Dispatch
//!
//! ```text
//! ┌──────────────┐                       ┌──────────────┐
//! │  Producer    │                       │  Observer    │
//! │              │  post("Resize", 42u32)│  on_resize() │
//! │              │ ──────┐               │              │
//! └──────────────┘       │               └──────────────┘
//!                        ▼                       ↑
//!               ┌──────────────────┐             │
//!               │ NotificationCenter│ ───────────┘
//!               │  (Registry)      │  registration order
//!               └──────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use notification_center::{NotificationCenter, ObserverId};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Window {
//!     width: AtomicU32,
//! }
//!
//! impl Window {
//!     fn on_resize(&self, width: u32) {
//!         self.width.store(width, Ordering::SeqCst);
//!     }
//! }
//!
//! let center = NotificationCenter::new();
//! let window = Arc::new(Window::default());
//! let observer = ObserverId::of(&*window);
//!
//! center.register_value(observer, "Resize", &window, Window::on_resize);
//! assert_eq!(center.post_notification_with_object("Resize", 640u32), Ok(1));
//! assert_eq!(window.width.load(Ordering::SeqCst), 640);
//!
//! // A plain i32 is not a u32
//! assert!(center.post_notification_with_object("Resize", 640i32).is_err());
//!
//! assert_eq!(center.remove_observer(observer), 1);
//! ```

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod binding;
pub mod center;
pub mod config;
pub mod errors;
pub mod global;
pub mod identity;
pub mod metrics;
pub mod name;
pub mod payload;
pub mod registry;

// Re-export main types
pub use binding::{BindingId, CallbackBinding, Invocation};
pub use center::{CenterStats, NotificationCenter, TeardownReport};
pub use config::{CenterConfig, LeakPolicy};
pub use errors::{ConfigError, DispatchError};
pub use global::default_center;
pub use identity::ObserverId;
pub use name::NotificationName;
pub use payload::{Payload, PayloadKind, PayloadShape, TypeTag};
pub use registry::Registry;

/// Label used for the process-wide center when none is configured.
pub const DEFAULT_CENTER_LABEL: &str = "default";

/// Initial registry capacity; registration counts are expected to be small.
pub const DEFAULT_REGISTRY_CAPACITY: usize = 32;
