//! # Dispatch Cost
//!
//! Conditions:
//! - Registry filled with bindings spread over many names
//! - Only a fraction of bindings match the posted name
//! - Mixed bare and typed bindings on the same name
//! - Register/remove churn against a populated registry

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use notification_center::{NotificationCenter, ObserverId, Payload};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const REGISTRY_SIZES: [usize; 4] = [10, 100, 1_000, 10_000];
const NAME_COUNT: usize = 16;

#[derive(Default)]
struct Sink(AtomicU64);

impl Sink {
    fn on_tick(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    fn on_value(&self, value: u64) {
        self.0.fetch_add(value, Ordering::Relaxed);
    }
}

fn name_for(index: usize) -> String {
    format!("bench.{}", index % NAME_COUNT)
}

/// Center with `size` bindings over `NAME_COUNT` names, half bare and half typed.
fn populated_center(size: usize) -> (NotificationCenter, Vec<Arc<Sink>>) {
    let center = NotificationCenter::new();
    let sinks: Vec<_> = (0..size).map(|_| Arc::new(Sink::default())).collect();

    for (index, sink) in sinks.iter().enumerate() {
        let observer = ObserverId::of(&**sink);
        if index % 2 == 0 {
            center.register_bare(observer, name_for(index), sink, Sink::on_tick);
        } else {
            center.register_value(observer, name_for(index), sink, Sink::on_value);
        }
    }
    (center, sinks)
}

pub fn bench_post_bare(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/post_bare");
    group.measurement_time(Duration::from_secs(5));

    for size in REGISTRY_SIZES {
        let (center, _sinks) = populated_center(size);
        let name = name_for(0);

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(center.post_notification(&name)))
        });
        center.teardown();
    }
    group.finish();
}

pub fn bench_post_value(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/post_value");
    group.measurement_time(Duration::from_secs(5));

    for size in REGISTRY_SIZES {
        let (center, _sinks) = populated_center(size);
        let name = name_for(1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(center.post_notification_with_object(&name, 7u64)))
        });
        center.teardown();
    }
    group.finish();
}

pub fn bench_post_prebuilt_payload(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/post_prebuilt_payload");

    let (center, _sinks) = populated_center(1_000);
    let name = name_for(1);
    let payload = Payload::value(7u64);

    group.bench_function("1000", |b| {
        b.iter(|| black_box(center.post_notification_with_payload(&name, &payload)))
    });
    group.finish();
    center.teardown();
}

pub fn bench_register_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/register_remove");

    for size in REGISTRY_SIZES {
        let (center, _sinks) = populated_center(size);
        let churn = Arc::new(Sink::default());
        let observer = ObserverId::of(&*churn);
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let name = name_for(rng.gen_range(0..NAME_COUNT));
                center.register_bare(observer, name, &churn, Sink::on_tick);
                black_box(center.remove_observer(observer))
            })
        });
        center.teardown();
    }
    group.finish();
}

pub fn bench_contains_observer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/contains_observer");

    for size in REGISTRY_SIZES {
        let (center, sinks) = populated_center(size);
        let Some(last) = sinks.last() else {
            continue;
        };
        let observer = ObserverId::of(&**last);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(center.contains_observer(observer)))
        });
        center.teardown();
    }
    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_post_bare(c);
    bench_post_value(c);
    bench_post_prebuilt_payload(c);
    bench_register_remove(c);
    bench_contains_observer(c);
}
