use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use kgraph::{CompassGraph, Direction};
use std::time::Duration;

const SIDE: u32 = 100;

fn cell(x: u32, y: u32) -> u32 {
    y * SIDE + x
}

// SIDE x SIDE grid, every cell linked to its east and north neighbors.
fn grid() -> CompassGraph<u32, u32> {
    let mut g = CompassGraph::new(0);
    for y in 0..SIDE {
        for x in 0..SIDE {
            g.insert(cell(x, y), x ^ y).unwrap();
        }
    }
    for y in 0..SIDE {
        for x in 0..SIDE {
            if x + 1 < SIDE {
                g.link(&cell(x, y), &cell(x + 1, y), Direction::East).unwrap();
            }
            if y + 1 < SIDE {
                g.link(&cell(x, y), &cell(x, y + 1), Direction::North).unwrap();
            }
        }
    }
    g
}

fn bench_build_grid(c: &mut Criterion) {
    c.bench_function("kgraph_build_grid_10k", |b| {
        b.iter_batched(|| (), |_| black_box(grid()), BatchSize::SmallInput)
    });
}

fn bench_walk(c: &mut Criterion) {
    c.bench_function("kgraph_walk_staircase", |b| {
        let g = grid();
        b.iter(|| {
            let mut cur = g.begin_at(&cell(0, 0)).unwrap();
            for i in 0..(2 * (SIDE - 1)) {
                let dir = if i % 2 == 0 { Direction::East } else { Direction::North };
                cur.advance(&g, dir.slot()).unwrap();
            }
            black_box(cur.key(&g).copied())
        })
    });
}

fn bench_probe_dead_end(c: &mut Criterion) {
    c.bench_function("kgraph_probe_dead_end", |b| {
        let g = grid();
        let corner = cell(SIDE - 1, SIDE - 1);
        b.iter(|| black_box(g.step(&corner, Direction::North).is_err()))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_build_grid, bench_walk, bench_probe_dead_end
}
criterion_main!(benches);
