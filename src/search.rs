use crate::cell::Cell;
use crate::min_heap::MinHeap;
use crate::pathing_grid::PathingGrid;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::{IndexMap, IndexSet};
use log::{debug, info, warn};
use num_traits::{One, Zero};
use thiserror::Error;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Errors that prevent a search from starting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A path was requested before both endpoints were placed.
    #[error("start and goal must both be set before searching")]
    EndpointsNotSet,
    /// An endpoint lies outside the grid.
    #[error("endpoint {0} is outside the grid bounds")]
    EndpointOutOfBounds(Cell),
}

/// Progress of a [SearchSession].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// The frontier still holds candidates and the goal is not finalized.
    Running,
    /// The goal was finalized; [SearchSession::path] yields the result.
    PathFound,
    /// The frontier emptied without finalizing the goal: no path exists.
    Exhausted,
}

/// A single Dijkstra search from a start to a goal cell over unit-cost,
/// 4-connected grid moves.
///
/// All search state lives in the session and is discarded with it. The session
/// borrows the grid immutably for its whole lifetime, so obstacles cannot
/// change under a search in flight. [step](Self::step) finalizes one cell per
/// call, letting a driver interleave searching with rendering of the
/// [visited](Self::visited) and [open](Self::open_cells) snapshots at whatever
/// cadence it likes; abandoning a search is simply dropping the session.
///
/// Both endpoints are treated as passable regardless of their obstacle flag:
/// expansion admits the goal cell even when it is blocked, and the start
/// cell's own flag is never consulted.
#[derive(Clone, Debug)]
pub struct SearchSession<'g, C = i32> {
    grid: &'g PathingGrid,
    start: Cell,
    goal: Cell,
    frontier: MinHeap<Cell, C>,
    distances: FxIndexMap<Cell, C>,
    predecessors: FxIndexMap<Cell, Cell>,
    visited: FxIndexSet<Cell>,
    state: SearchState,
}

impl<'g, C: Zero + One + Ord + Copy> SearchSession<'g, C> {
    /// Creates a session with the start cell seeded at distance zero.
    pub fn new(grid: &'g PathingGrid, start: Cell, goal: Cell) -> Result<Self, SearchError> {
        for endpoint in [start, goal] {
            if !grid.in_bounds(endpoint) {
                return Err(SearchError::EndpointOutOfBounds(endpoint));
            }
        }
        let mut session = SearchSession {
            grid,
            start,
            goal,
            frontier: MinHeap::new(),
            distances: FxIndexMap::default(),
            predecessors: FxIndexMap::default(),
            visited: FxIndexSet::default(),
            state: SearchState::Running,
        };
        session.distances.insert(start, C::zero());
        session.frontier.insert(start, C::zero());
        Ok(session)
    }

    /// Finalizes the next frontier cell and relaxes its neighbours, returning
    /// the state the search is in afterwards.
    ///
    /// The frontier tolerates duplicate entries instead of supporting
    /// decrease-key: a cell improved after insertion is simply re-inserted
    /// under its better distance. Entries whose cell was already finalized are
    /// therefore stale and must be discarded here before anything else
    /// happens.
    pub fn step(&mut self) -> SearchState {
        if self.state != SearchState::Running {
            return self.state;
        }
        let (cell, distance) = loop {
            if self.frontier.is_empty() {
                self.state = SearchState::Exhausted;
                return self.state;
            }
            // The emptiness check above guards this extraction; an error here
            // would be an engine invariant violation.
            let entry = self
                .frontier
                .extract_min()
                .expect("frontier is non-empty");
            // A freshly inserted cell is finalized; a known one is stale.
            if self.visited.insert(entry.0) {
                break entry;
            }
        };
        debug!("finalized {cell}");
        if cell == self.goal {
            self.state = SearchState::PathFound;
            return self.state;
        }
        for neighbour in self.grid.neighbors(cell) {
            if self.grid.get_cell(neighbour) && neighbour != self.goal {
                continue;
            }
            let new_distance = distance + C::one();
            match self.distances.entry(neighbour) {
                Vacant(e) => {
                    e.insert(new_distance);
                }
                Occupied(mut e) => {
                    if new_distance >= *e.get() {
                        continue;
                    }
                    // The old frontier entry stays in place and is discarded
                    // as stale once popped.
                    e.insert(new_distance);
                }
            }
            self.predecessors.insert(neighbour, cell);
            self.frontier.insert(neighbour, new_distance);
        }
        self.state
    }

    /// Drives [step](Self::step) until the search reaches a terminal state.
    pub fn run(&mut self) -> SearchState {
        while self.state == SearchState::Running {
            self.step();
        }
        self.state
    }

    /// The start-to-goal path, available once the goal has been finalized.
    /// Walks the predecessor links backward from the goal and reverses the
    /// collected sequence.
    pub fn path(&self) -> Option<Vec<Cell>> {
        if self.state != SearchState::PathFound {
            return None;
        }
        let mut path: Vec<Cell> = itertools::unfold(Some(self.goal), |current| {
            (*current).map(|cell| {
                *current = self.predecessors.get(&cell).copied();
                cell
            })
        })
        .collect();
        path.reverse();
        Some(path)
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Finalized cells, in finalization order.
    pub fn visited(&self) -> impl Iterator<Item = Cell> + '_ {
        self.visited.iter().copied()
    }

    /// Cells that are discovered but not finalized, in discovery order. This
    /// is the frontier membership with stale duplicates collapsed.
    pub fn open_cells(&self) -> Vec<Cell> {
        self.distances
            .keys()
            .filter(|cell| !self.visited.contains(*cell))
            .copied()
            .collect()
    }

    /// Best known distance from the start, or [None] for undiscovered cells.
    /// Finalized cells report their final, optimal distance.
    pub fn distance(&self, cell: &Cell) -> Option<C> {
        self.distances.get(cell).copied()
    }
}

/// Computes a shortest path between two optionally-placed endpoints, returning
/// the cell sequence from start to goal inclusive, or [None] when no path
/// exists.
///
/// Endpoints arrive as [Option] because interactive drivers place them one
/// click at a time; a missing endpoint is a precondition failure rather than a
/// "no path" outcome. When both endpoints are unblocked the connected
/// components of the grid are consulted first, so queries against unreachable
/// goals return without flood-filling the grid. The component early-out does
/// not apply to blocked endpoints, which the session treats as passable while
/// the component structure does not.
pub fn shortest_path(
    grid: &PathingGrid,
    start: Option<Cell>,
    goal: Option<Cell>,
) -> Result<Option<Vec<Cell>>, SearchError> {
    let (start, goal) = match (start, goal) {
        (Some(start), Some(goal)) => (start, goal),
        _ => return Err(SearchError::EndpointsNotSet),
    };
    let mut session: SearchSession = SearchSession::new(grid, start, goal)?;
    let endpoints_unblocked = !grid.get_cell(start) && !grid.get_cell(goal);
    if endpoints_unblocked && grid.unreachable(&start, &goal) {
        info!("{goal} is not in the component of {start}, skipping search");
        return Ok(None);
    }
    match session.run() {
        SearchState::PathFound => Ok(session.path()),
        SearchState::Exhausted => {
            if endpoints_unblocked && grid.reachable(&start, &goal) {
                warn!("{goal} is in the component of {start} but could not be pathed to, are the components stale?");
            }
            info!("frontier exhausted, no path from {start} to {goal}");
            Ok(None)
        }
        SearchState::Running => unreachable!("run only returns terminal states"),
    }
}
