use criterion::{criterion_group, criterion_main, Criterion};
use grid_dijkstra::{shortest_path, Cell, PathingGrid};
use rand::prelude::*;
use std::hint::black_box;

fn scatter_grid(rows: usize, cols: usize, density: f64, seed: u64) -> PathingGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = PathingGrid::new(rows, cols, false);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            grid.set(row, col, rng.gen_bool(density));
        }
    }
    grid.set(0, 0, false);
    grid.set(rows as i32 - 1, cols as i32 - 1, false);
    grid.generate_components();
    grid
}

fn search_bench(c: &mut Criterion) {
    for (n, density) in [(64usize, 0.25), (128, 0.25)] {
        let grid = scatter_grid(n, n, density, 0);
        let start = Cell::new(0, 0);
        let goal = Cell::new(n as i32 - 1, n as i32 - 1);
        c.bench_function(format!("{n}x{n} scatter, corner to corner").as_str(), |b| {
            b.iter(|| black_box(shortest_path(&grid, Some(start), Some(goal))))
        });
    }
}

fn no_path_bench(c: &mut Criterion) {
    // A wall splits the grid, so the component check answers without a search.
    let n = 128usize;
    let mut grid = PathingGrid::new(n, n, false);
    grid.fill_rect(0, n as i32 / 2, n as i32, 1, true);
    grid.generate_components();
    let start = Cell::new(0, 0);
    let goal = Cell::new(n as i32 - 1, n as i32 - 1);
    c.bench_function("128x128 walled, component early-out", |b| {
        b.iter(|| black_box(shortest_path(&grid, Some(start), Some(goal))))
    });
}

criterion_group!(benches, search_bench, no_path_bench);
criterion_main!(benches);
