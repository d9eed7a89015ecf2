use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use minegrid_core::{Board, GameConfig, MineLayout};

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::BEGINNER),
    ("intermediate", GameConfig::INTERMEDIATE),
    ("expert", GameConfig::EXPERT),
];

/// Worst-case cascade: a mine-free board floods open in one call.
fn bench_full_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_tiers");
    for (name, config) in TIERS {
        let layout = MineLayout::from_positions(config.size, &[]).unwrap();
        group.bench_function(name, |b| {
            b.iter_batched(
                || Board::from_layout(layout.clone()),
                |mut board| board.open_cell((0, 0)).unwrap(),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_cascade);
criterion_main!(benches);
