//! # maze_pathfinding
//!
//! A grid-based pathfinding engine with five interchangeable search
//! strategies (breadth-first, depth-first, A*, Dijkstra and greedy
//! best-first) over a bounded two-dimensional obstacle grid. All five run
//! on one shared traversal skeleton; a [Strategy] only picks the frontier
//! discipline, the frontier score and the relaxation rule.
//!
//! The engine is decoupled from presentation: a run emits visit, path and
//! no-path events through a caller-supplied [SearchSink], and any display
//! pacing happens on the consumer side. A [RunController] owns at most one
//! active run; [RunHandle::cancel] stops a run cooperatively between loop
//! iterations.
//!
//! ```
//! use maze_pathfinding::{Coord, EventLog, MazeGrid, RunController, Strategy};
//! use std::sync::Arc;
//!
//! let grid = Arc::new(MazeGrid::new(5));
//! let mut controller = RunController::new();
//! let mut run = controller
//!     .start_run(grid, Coord::new(0, 0), Coord::new(4, 4), Strategy::Bfs)
//!     .unwrap();
//! let mut log = EventLog::new();
//! run.drive(&mut log);
//! assert_eq!(log.path().unwrap().len(), 9);
//! ```

mod controller;
mod coord;
mod engine;
mod error;
mod frontier;
mod grid;
mod sink;
mod strategy;

pub use controller::{CancelToken, Run, RunController, RunHandle, RunStatus};
pub use coord::{Coord, Direction};
pub use error::{Endpoint, SearchError};
pub use grid::{CellKind, MazeGrid};
pub use sink::{EventLog, NullSink, SearchEvent, SearchSink};
pub use strategy::Strategy;
