//! # Integration Tests
//!
//! Cross-module behavior of the notification center: registry ordering,
//! payload typing, removal, reentrant callbacks, and multi-threaded use.

pub mod logging;
pub mod properties;
