/// Fuzzes the search engine by checking for many random grids that a path is
/// found exactly when the goal is reachable through the connected components,
/// and that found paths are valid and as short as a brute-force breadth-first
/// oracle says they can be.
use grid_dijkstra::{shortest_path, Cell, PathingGrid, SearchSession, SearchState};
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(rows: usize, cols: usize, rng: &mut StdRng) -> PathingGrid {
    let mut grid = PathingGrid::new(rows, cols, false);
    for row in 0..rows as i32 {
        for col in 0..cols as i32 {
            grid.set(row, col, rng.gen_bool(0.4));
        }
    }
    grid.generate_components();
    grid
}

/// Brute-force hop count from start to goal, honouring the same
/// blocked-endpoint override as the engine.
fn bfs_distance(grid: &PathingGrid, start: Cell, goal: Cell) -> Option<usize> {
    let mut seen = vec![false; grid.rows() * grid.cols()];
    let mut queue = VecDeque::new();
    seen[grid.cell_ix(start)] = true;
    queue.push_back((start, 0));
    while let Some((cell, distance)) = queue.pop_front() {
        if cell == goal {
            return Some(distance);
        }
        for neighbour in grid.neighbors(cell) {
            if seen[grid.cell_ix(neighbour)] {
                continue;
            }
            if grid.get_cell(neighbour) && neighbour != goal {
                continue;
            }
            seen[grid.cell_ix(neighbour)] = true;
            queue.push_back((neighbour, distance + 1));
        }
    }
    None
}

fn visualize_grid(grid: &PathingGrid, start: &Cell, end: &Cell) {
    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let cell = Cell::new(row, col);
            if *start == cell {
                print!("S");
            } else if *end == cell {
                print!("G");
            } else if grid.get(row, col) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

fn assert_valid_path(grid: &PathingGrid, path: &[Cell], start: Cell, goal: Cell) {
    assert_eq!(*path.first().unwrap(), start);
    assert_eq!(*path.last().unwrap(), goal);
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
    }
    if path.len() > 1 {
        for cell in &path[1..path.len() - 1] {
            assert!(!grid.get_cell(*cell), "path enters blocked cell {cell}");
        }
    }
}

#[test]
fn fuzz_path_exists_iff_reachable() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Cell::new(0, 0);
    let end = Cell::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        grid.set_cell(start, false);
        grid.set_cell(end, false);
        grid.update();
        let reachable = grid.reachable(&start, &end);
        let path = shortest_path(&grid, Some(start), Some(end)).unwrap();
        // Show the grid if the outcomes disagree
        if path.is_some() != reachable {
            visualize_grid(&grid, &start, &end);
        }
        assert!(path.is_some() == reachable);
        if let Some(path) = path {
            assert_valid_path(&grid, &path, start, end);
        }
    }
}

#[test]
fn fuzz_distance_matches_bfs_oracle() {
    const N: usize = 8;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, N, &mut rng);
        let start = Cell::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let end = Cell::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
        let oracle = bfs_distance(&grid, start, end);
        let mut session: SearchSession = SearchSession::new(&grid, start, end).unwrap();
        match session.run() {
            SearchState::PathFound => {
                let path = session.path().unwrap();
                let oracle_distance = oracle.unwrap_or_else(|| {
                    visualize_grid(&grid, &start, &end);
                    panic!("engine found a path the oracle says cannot exist");
                });
                assert_eq!(path.len(), oracle_distance + 1);
                assert_eq!(session.distance(&end), Some(oracle_distance as i32));
                assert_valid_path(&grid, &path, start, end);
            }
            SearchState::Exhausted => {
                if oracle.is_some() {
                    visualize_grid(&grid, &start, &end);
                }
                assert_eq!(oracle, None);
            }
            SearchState::Running => unreachable!(),
        }
    }
}

/// Every finalized cell's distance is optimal, not just the goal's.
#[test]
fn fuzz_all_finalized_distances_are_optimal() {
    const N: usize = 6;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, N, &mut rng);
        let start = Cell::new(0, 0);
        grid.set_cell(start, false);
        grid.update();
        // An unreachable goal exhausts the frontier, finalizing everything
        // reachable from the start along the way.
        let goal = Cell::new(N as i32 - 1, N as i32 - 1);
        let mut session: SearchSession = SearchSession::new(&grid, start, goal).unwrap();
        session.run();
        let visited: Vec<Cell> = session.visited().collect();
        for cell in visited {
            if cell == goal {
                continue;
            }
            let oracle = bfs_distance(&grid, start, cell);
            assert_eq!(session.distance(&cell), oracle.map(|d| d as i32));
        }
    }
}

#[test]
fn fuzz_search_is_idempotent() {
    const N: usize = 8;
    const N_GRIDS: usize = 200;
    let mut rng = StdRng::seed_from_u64(2);
    let start = Cell::new(0, 0);
    let end = Cell::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, N, &mut rng);
        let first = shortest_path(&grid, Some(start), Some(end)).unwrap();
        let second = shortest_path(&grid, Some(start), Some(end)).unwrap();
        assert_eq!(first, second);
    }
}
