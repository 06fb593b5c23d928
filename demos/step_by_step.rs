use grid_dijkstra::{Cell, PathingGrid, SearchSession, SearchState};
use std::thread;
use std::time::Duration;

// Drives a search one finalization round at a time and renders each frame:
// '#' blocked, 'x' finalized, 'o' open frontier, '*' the final path.
fn render(grid: &PathingGrid, session: &SearchSession, path: Option<&[Cell]>) {
    let visited: Vec<Cell> = session.visited().collect();
    let open = session.open_cells();
    for row in 0..grid.rows() as i32 {
        for col in 0..grid.cols() as i32 {
            let cell = Cell::new(row, col);
            let glyph = if cell == session.start() {
                'S'
            } else if cell == session.goal() {
                'G'
            } else if path.is_some_and(|p| p.contains(&cell)) {
                '*'
            } else if grid.get_cell(cell) {
                '#'
            } else if visited.contains(&cell) {
                'x'
            } else if open.contains(&cell) {
                'o'
            } else {
                '.'
            };
            print!("{glyph}");
        }
        println!();
    }
    println!();
}

fn main() {
    let mut grid = PathingGrid::new(10, 10, false);
    grid.fill_rect(2, 0, 1, 7, true);
    grid.fill_rect(5, 3, 1, 7, true);
    grid.generate_components();
    let start = Cell::new(0, 0);
    let goal = Cell::new(9, 9);
    let mut session: SearchSession =
        SearchSession::new(&grid, start, goal).expect("endpoints are in bounds");
    while session.step() == SearchState::Running {
        render(&grid, &session, None);
        thread::sleep(Duration::from_millis(40));
    }
    match session.path() {
        Some(path) => {
            render(&grid, &session, Some(&path));
            println!("Found a path of {} cells", path.len());
        }
        None => println!("No path exists"),
    }
}
