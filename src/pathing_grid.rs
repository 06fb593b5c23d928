use crate::cell::Cell;
use core::fmt;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// [PathingGrid] stores which cells of a rectangular grid are blocked ([true])
/// or passable ([false]) and maintains connected components of the passable
/// cells in a [UnionFind] structure. Components give a cheap reachability
/// check which lets path queries avoid flood-filling behaviour when no path
/// exists.
///
/// The grid is edited between searches; a running
/// [SearchSession](crate::SearchSession) borrows it immutably.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    cells: Vec<bool>,
    rows: usize,
    cols: usize,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    pub fn new(rows: usize, cols: usize, blocked: bool) -> PathingGrid {
        PathingGrid {
            cells: vec![blocked; rows * cols],
            rows,
            cols,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    pub fn cell_ix(&self, cell: Cell) -> usize {
        debug_assert!(self.in_bounds(cell));
        cell.row as usize * self.cols + cell.col as usize
    }

    pub fn get(&self, row: i32, col: i32) -> bool {
        self.get_cell(Cell::new(row, col))
    }

    pub fn get_cell(&self, cell: Cell) -> bool {
        self.cells[self.cell_ix(cell)]
    }

    /// Updates a position on the grid. Unblocking joins the surrounding
    /// components; blocking potentially breaks a component apart, which flags
    /// the components as dirty for regeneration on the next
    /// [update](Self::update).
    pub fn set(&mut self, row: i32, col: i32, blocked: bool) {
        self.set_cell(Cell::new(row, col), blocked);
    }

    pub fn set_cell(&mut self, cell: Cell, blocked: bool) {
        if self.get_cell(cell) != blocked && blocked {
            self.components_dirty = true;
        } else if !blocked {
            let cell_ix = self.cell_ix(cell);
            for neighbour in self.passable_neighbors(cell) {
                self.components.union(cell_ix, self.cell_ix(neighbour));
            }
        }
        let ix = self.cell_ix(cell);
        self.cells[ix] = blocked;
    }

    /// Sets a rectangular region of `height` x `width` cells whose top-left
    /// corner is at `(top, left)`.
    pub fn fill_rect(&mut self, top: i32, left: i32, height: i32, width: i32, blocked: bool) {
        for row in top..top + height {
            for col in left..left + width {
                self.set(row, col, blocked);
            }
        }
    }

    /// The in-bounds cardinal neighbours of a cell in up, down, left, right
    /// order.
    pub fn neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// The in-bounds, unblocked cardinal neighbours of a cell in up, down,
    /// left, right order. Pure query; the scan order only affects tie-breaking
    /// among equal-distance discoveries.
    pub fn passable_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        self.neighbors(cell)
            .into_iter()
            .filter(|n| !self.get_cell(*n))
            .collect()
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, cell: &Cell) -> usize {
        self.components.find(self.cell_ix(*cell))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self
                .components
                .equiv(self.cell_ix(*start), self.cell_ix(*goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable grid
    /// neighbours to the same components. Scanning down and right covers every
    /// cardinal adjacency once.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Cell::new(row, col);
                if self.get_cell(cell) {
                    continue;
                }
                let cell_ix = self.cell_ix(cell);
                for neighbour in [Cell::new(row + 1, col), Cell::new(row, col + 1)] {
                    if self.in_bounds(neighbour) && !self.get_cell(neighbour) {
                        self.components.union(cell_ix, self.cell_ix(neighbour));
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                write!(f, "{}", if self.get(row, col) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
