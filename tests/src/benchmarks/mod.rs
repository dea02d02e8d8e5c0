//! # Dispatch Benchmarks
//!
//! Cost of posting, registering, and removing at growing registry sizes.

pub mod dispatch;
