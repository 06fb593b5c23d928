//! # grid_dijkstra
//!
//! Shortest-path search on uniform-cost grids. Implements
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
//! over 4-directional cell adjacency, driven by a duplicate-tolerant binary
//! min-heap frontier. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! A search runs inside a [SearchSession], which owns all per-search state and
//! can be driven one finalization step at a time. Observers use the session's
//! visited/open snapshots to render intermediate search progress; the
//! [shortest_path] convenience drives a session to completion in one call.

pub mod cell;
pub mod min_heap;
pub mod pathing_grid;
pub mod search;

pub use cell::Cell;
pub use min_heap::{EmptyQueueError, MinHeap};
pub use pathing_grid::PathingGrid;
pub use search::{shortest_path, SearchError, SearchSession, SearchState};
