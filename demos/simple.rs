use grid_dijkstra::{shortest_path, Cell, PathingGrid};

// In this demo a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  G#
// #####
// S marks the start
// G marks the goal
fn main() {
    let mut grid = PathingGrid::new(5, 5, true);
    grid.fill_rect(1, 1, 3, 3, false);
    grid.set(2, 2, true);
    grid.generate_components();
    let start = Cell::new(1, 1);
    let goal = Cell::new(3, 3);
    match shortest_path(&grid, Some(start), Some(goal)) {
        Ok(Some(path)) => {
            println!("A path has been found:");
            for cell in path {
                println!("{cell}");
            }
        }
        Ok(None) => println!("No path exists"),
        Err(e) => println!("Search rejected: {e}"),
    }
}
