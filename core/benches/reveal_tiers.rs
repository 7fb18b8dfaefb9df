use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sweeper_core::*;

const TIERS: [(&str, Coord, f64); 3] = [
    ("small", 7, 0.1),
    ("max", MAX_DIMENSION, 0.15),
    ("wide", 64, 0.2),
];

fn limits() -> Limits {
    Limits::new(64)
}

fn bench_start(c: &mut Criterion) {
    let mut group = c.benchmark_group("start");
    for (name, dimension, density) in TIERS {
        let config = GameConfig::new(dimension, dimension, density);
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                let rng = SmallRng::seed_from_u64(seed);
                black_box(GameEngine::with_limits(limits(), config, rng))
            });
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_reveal");
    for (name, dimension, _) in TIERS {
        let size = (dimension, dimension);
        // a single corner mine leaves one connected zero region
        let layout = MineLayout::from_mine_coords(size, &[(dimension - 1, dimension - 1)])
            .expect("corner is in bounds");
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, layout| {
            b.iter(|| {
                let mut engine =
                    GameEngine::from_layout(layout.clone(), SmallRng::seed_from_u64(0))
                        .expect("layout has safe cells");
                black_box(engine.reveal((0, 0)))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_start, bench_flood);
criterion_main!(benches);
