//! Criterion benchmarks for the per-touch hot path.
//!
//! Every remote touch runs argument decoding, coordinate clamping, and tap
//! construction before it reaches the OS dispatcher, so these operations sit
//! on the command-to-injection latency path.
//!
//! Run with:
//! ```bash
//! cargo bench --package reach-core --bench touch_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reach_core::domain::geometry::{ScreenBounds, TouchCommand};
use reach_core::domain::gesture::GestureRequest;
use reach_core::protocol::commands::TouchArgs;
use serde_json::json;

// ── Fixture builders ──────────────────────────────────────────────────────────

/// A typical phone display in portrait orientation.
fn phone_bounds() -> ScreenBounds {
    ScreenBounds::new(1080, 2400)
}

// ── Benchmarks: clamping ──────────────────────────────────────────────────────

/// Benchmarks [`TouchCommand::clamp_to`] for in-bounds and corrected input.
fn bench_clamp(c: &mut Criterion) {
    let bounds = phone_bounds();
    let mut group = c.benchmark_group("clamp");

    // Hot path: controller coordinates are normally already in bounds.
    group.bench_function("in_bounds", |b| {
        b.iter(|| TouchCommand::new(black_box(540.0), black_box(1200.0)).clamp_to(bounds))
    });

    group.bench_function("out_of_range_both_axes", |b| {
        b.iter(|| TouchCommand::new(black_box(-5.0), black_box(3000.0)).clamp_to(bounds))
    });

    group.finish();
}

// ── Benchmarks: argument decoding ─────────────────────────────────────────────

/// Benchmarks [`TouchArgs::decode`] over well-formed and degenerate args.
fn bench_decode_touch_args(c: &mut Criterion) {
    let full = json!({ "x": 540.0, "y": 1200.0 });
    let empty = json!({});
    let malformed = json!({ "x": "540", "y": [1, 2] });

    let mut group = c.benchmark_group("decode_touch_args");

    group.bench_function("both_present", |b| {
        b.iter(|| TouchArgs::decode(black_box(&full)))
    });

    group.bench_function("both_missing", |b| {
        b.iter(|| TouchArgs::decode(black_box(&empty)))
    });

    group.bench_function("malformed", |b| {
        b.iter(|| TouchArgs::decode(black_box(&malformed)))
    });

    group.finish();
}

// ── Benchmarks: tap construction ──────────────────────────────────────────────

/// Benchmarks [`GestureRequest::tap`] (includes correlation-id generation).
fn bench_build_tap(c: &mut Criterion) {
    let point = TouchCommand::new(540.0, 1200.0).clamp_to(phone_bounds());
    let mut group = c.benchmark_group("build_tap");

    group.bench_function("single_tap", |b| {
        b.iter(|| GestureRequest::tap(black_box(point)))
    });

    group.finish();
}

criterion_group!(benches, bench_clamp, bench_decode_touch_args, bench_build_tap);
criterion_main!(benches);
