use criterion::{criterion_group, criterion_main, Criterion};
use minegrid_core::{GameConfig, MineLayoutGenerator, RandomMineGenerator, StartSafety};

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::BEGINNER),
    ("intermediate", GameConfig::INTERMEDIATE),
    ("expert", GameConfig::EXPERT),
];

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_tiers");
    for (name, config) in TIERS {
        group.bench_function(name, |b| {
            b.iter(|| RandomMineGenerator::new(0xC0FFEE, (0, 0), StartSafety::SafeZone).generate(config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
