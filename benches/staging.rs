//! Staging buffer benchmark suite
//!
//! Run with: `cargo bench --bench staging`
//!
//! # What we measure
//!
//! - Steady-state push/pop round trip (the hot path, no resizing)
//! - Pooled borrow/return round trip vs a fresh allocation per message

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use transit_buffer::{FormatBufferPool, TransitEvent, TransitEventBuffer};

fn bench_staging_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("staging");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_pop_round_trip", |b| {
        let mut buffer = TransitEventBuffer::<TransitEvent>::new(128);
        b.iter(|| {
            let slot = buffer.back();
            slot.timestamp_ns = 42;
            buffer.push_back();
            let event = buffer.front().unwrap();
            black_box(event.timestamp_ns);
            buffer.pop_front();
        })
    });

    group.finish();
}

fn bench_format_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_pool");
    group.throughput(Throughput::Elements(1));

    // Large enough to clear the retention threshold, so the steady state
    // reuses one retained buffer
    let message = vec![0x41u8; 16 * 1024];

    group.bench_function("borrow_return_pooled", |b| {
        let mut pool = FormatBufferPool::new(8);
        b.iter(|| {
            let mut buffer = pool.borrow_buffer();
            buffer.clear();
            buffer.extend_from_slice(&message);
            black_box(buffer.len());
            pool.return_buffer(buffer);
        })
    });

    group.bench_function("fresh_allocation", |b| {
        b.iter(|| {
            let mut buffer = bytes::BytesMut::new();
            buffer.extend_from_slice(&message);
            black_box(buffer.len());
        })
    });

    group.finish();
}

criterion_group!(benches, bench_staging_round_trip, bench_format_pool);
criterion_main!(benches);
