use criterion::{criterion_group, criterion_main, Criterion};
use railbed::{Point2, TrackCurve, TrackLine};

fn bench_full_recompute(c: &mut Criterion) {
    let mut curve = TrackCurve::from_control_points([
        Point2::new(0.0, 0.0),
        Point2::new(40.0, 90.0),
        Point2::new(120.0, -90.0),
        Point2::new(160.0, 0.0),
    ]);
    curve.set_resolution(0.001);

    c.bench_function("full_recompute_1001_samples", |b| {
        b.iter(|| {
            // Dirty the control points so every iteration pays for a full
            // recompute of all four buffers.
            curve.translate(0.1, 0.0);
            std::hint::black_box(curve.polyline(TrackLine::Center).len())
        })
    });

    c.bench_function("cached_read_1001_samples", |b| {
        b.iter(|| std::hint::black_box(curve.polyline(TrackLine::LeftEdge).len()))
    });
}

criterion_group!(benches, bench_full_recompute);
criterion_main!(benches);
