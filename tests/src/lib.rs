//! # Notification Center Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Dispatch throughput, shared with benches/
//! ├── fixtures.rs       # Recording receivers and a shared journal
//! └── integration/      # Cross-module behavior
//!     ├── scenarios.rs      # End-to-end register/post/remove flows
//!     ├── reentrancy.rs     # Callbacks that register/post/remove
//!     ├── concurrency.rs    # Several threads on one center
//!     ├── logging.rs        # Dispatch with a subscriber installed
//!     └── properties.rs     # proptest invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nc-tests
//!
//! # By category
//! cargo test -p nc-tests integration::scenarios
//! cargo test -p nc-tests integration::properties
//!
//! # Benchmarks
//! cargo bench -p nc-tests
//! ```

#![allow(dead_code)]

pub mod benchmarks;
pub mod fixtures;
pub mod integration;
