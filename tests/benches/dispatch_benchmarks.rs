//! # Notification Center Benchmarks
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | post (bare or typed) | linear in registry size |
//! | register + remove_observer | linear in registry size |
//! | contains_observer | linear in registry size |

use criterion::{criterion_group, criterion_main, Criterion};

fn dispatch(c: &mut Criterion) {
    nc_tests::benchmarks::dispatch::register_benchmarks(c);
}

criterion_group!(benches, dispatch);
criterion_main!(benches);
