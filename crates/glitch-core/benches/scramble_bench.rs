//! Benchmarks for plan construction and per-frame rendering.
//!
//! Run with: cargo bench -p glitch-core

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glitch_core::scramble::{
    FrameLoop, ScrambleConfig, ScrambleEngine, SharedText, TransitionPlan,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

fn heading(len: usize) -> String {
    "ENTER YOUR EMAIL ".chars().cycle().take(len).collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scramble/build");
    let cfg = ScrambleConfig::default();
    for len in [16usize, 64, 256] {
        let old = heading(len);
        let new: String = old.chars().rev().collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| TransitionPlan::build(black_box(&old), black_box(&new), &cfg, &mut rng));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scramble/render");
    let cfg = ScrambleConfig::default();
    for len in [16usize, 64, 256] {
        let old = heading(len);
        let new: String = old.chars().rev().collect();
        let mut rng = StdRng::seed_from_u64(2);
        let mut plan = TransitionPlan::build(&old, &new, &cfg, &mut rng);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| black_box(plan.render(black_box(10), &cfg, &mut rng)));
        });
    }
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    c.bench_function("scramble/full_run_16", |b| {
        b.iter(|| {
            let frames = FrameLoop::new();
            let mut engine: ScrambleEngine<FrameLoop> = ScrambleEngine::seeded(frames.clone(), 3);
            let el = SharedText::new("ENTER YOUR EMAIL");
            let _done = engine.set_text(el.clone(), "IDENTITY VERIFY");
            while engine.is_animating() {
                for request in frames.tick() {
                    engine.on_frame(request);
                }
            }
            black_box(el.text())
        });
    });
}

criterion_group!(benches, bench_build, bench_render, bench_full_run);
criterion_main!(benches);
