//! The shared traversal skeleton all five strategies run on. Per-strategy
//! behaviour (extraction discipline, frontier score, relaxation) comes from
//! [Strategy]; discovery bookkeeping, the stale-entry skip, visit emission
//! and path reconstruction are common.

use crate::coord::{Coord, Direction};
use crate::frontier::Frontier;
use crate::grid::MazeGrid;
use crate::sink::SearchSink;
use crate::strategy::Strategy;
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::sync::Arc;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Per-node bookkeeping: the index of the predecessor in the discovery map
/// ([usize::MAX] for the start) and the cost of the best known path from
/// the start.
#[derive(Debug)]
struct NodeMeta {
    parent: usize,
    cost: i32,
}

/// Result of one traversal loop iteration.
pub(crate) enum StepResult {
    /// A coordinate was settled; the loop continues.
    Settled,
    /// A stale frontier entry was discarded without emitting an event.
    Skipped,
    /// The end was settled and the path emitted.
    Completed,
    /// The frontier emptied and no-path was emitted.
    Exhausted,
}

/// One run's worth of traversal state. Exclusively owned by its
/// [Run](crate::Run); never shared or reused across runs.
#[derive(Debug)]
pub(crate) struct Traversal {
    grid: Arc<MazeGrid>,
    start: Coord,
    end: Coord,
    strategy: Strategy,
    frontier: Frontier,
    nodes: FxIndexMap<Coord, NodeMeta>,
    visited: FxHashSet<Coord>,
}

impl Traversal {
    pub fn new(grid: Arc<MazeGrid>, start: Coord, end: Coord, strategy: Strategy) -> Traversal {
        let mut frontier = strategy.frontier();
        let mut nodes = FxIndexMap::default();
        nodes.insert(
            start,
            NodeMeta {
                parent: usize::MAX,
                cost: 0,
            },
        );
        frontier.push(0, strategy.priority(0, &start, &end));
        Traversal {
            grid,
            start,
            end,
            strategy,
            frontier,
            nodes,
            visited: FxHashSet::default(),
        }
    }

    /// One loop iteration: extract the best frontier entry, settle it, emit
    /// events and schedule its passable neighbours. Cancellation is checked
    /// by the caller between iterations, never in here.
    pub fn step<S: SearchSink>(&mut self, sink: &mut S) -> StepResult {
        let index = match self.frontier.pop() {
            Some(index) => index,
            None => {
                sink.on_no_path();
                return StepResult::Exhausted;
            }
        };
        let (coord, cost) = {
            let (coord, meta) = self.nodes.get_index(index).unwrap();
            (*coord, meta.cost)
        };
        // The frontier may hold several entries for one coordinate when a
        // better path to it was found after scheduling. Only the first
        // extraction settles it; later ones are stale and dropped silently.
        if !self.visited.insert(coord) {
            return StepResult::Skipped;
        }
        if coord != self.start && coord != self.end {
            sink.on_visit(coord);
        }
        if coord == self.end {
            let path = self.reconstruct(index);
            sink.on_path(&path);
            return StepResult::Completed;
        }
        let mut candidates: SmallVec<[Coord; 4]> =
            Direction::ORDER.iter().map(|dir| coord.step(*dir)).collect();
        if self.strategy.reverses_expansion() {
            candidates.reverse();
        }
        for neighbour in candidates {
            self.expand(index, neighbour, cost);
        }
        StepResult::Settled
    }

    /// Considers one neighbour candidate for scheduling, applying the
    /// strategy's relaxation rule.
    fn expand(&mut self, index: usize, neighbour: Coord, cost: i32) {
        if !self.grid.is_passable(&neighbour) || self.visited.contains(&neighbour) {
            return;
        }
        let new_cost = cost + 1;
        let priority = self.strategy.priority(new_cost, &neighbour, &self.end);
        match self.nodes.entry(neighbour) {
            Vacant(e) => {
                let n = e.index();
                e.insert(NodeMeta {
                    parent: index,
                    cost: new_cost,
                });
                self.frontier.push(n, priority);
            }
            Occupied(mut e) => {
                // First discovery wins unless the strategy relaxes, in which
                // case a strictly cheaper path re-admits the node.
                if self.strategy.relaxes() && new_cost < e.get().cost {
                    let n = e.index();
                    e.insert(NodeMeta {
                        parent: index,
                        cost: new_cost,
                    });
                    self.frontier.push(n, priority);
                }
            }
        }
    }

    /// Walks the predecessor links back from the settled end node and
    /// returns the start-to-end coordinate sequence.
    fn reconstruct(&self, end_index: usize) -> Vec<Coord> {
        let mut path: Vec<Coord> = itertools::unfold(end_index, |index| {
            self.nodes.get_index(*index).map(|(coord, meta)| {
                *index = meta.parent;
                *coord
            })
        })
        .collect();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellKind;
    use crate::sink::EventLog;

    fn open_grid(size: usize) -> Arc<MazeGrid> {
        Arc::new(MazeGrid::new(size))
    }

    fn run_to_end(traversal: &mut Traversal, sink: &mut EventLog) -> StepResult {
        loop {
            match traversal.step(sink) {
                StepResult::Settled | StepResult::Skipped => continue,
                terminal => return terminal,
            }
        }
    }

    #[test]
    fn start_equals_end_yields_single_element_path() {
        for strategy in Strategy::ALL {
            let mut traversal =
                Traversal::new(open_grid(3), Coord::new(1, 1), Coord::new(1, 1), strategy);
            let mut log = EventLog::new();
            assert!(matches!(run_to_end(&mut traversal, &mut log), StepResult::Completed));
            assert_eq!(log.path(), Some(&[Coord::new(1, 1)][..]));
            assert!(log.visits().is_empty());
        }
    }

    #[test]
    fn bfs_visits_in_fifo_order_from_start() {
        let mut traversal = Traversal::new(
            open_grid(3),
            Coord::new(0, 0),
            Coord::new(2, 2),
            Strategy::Bfs,
        );
        let mut log = EventLog::new();
        run_to_end(&mut traversal, &mut log);
        // First ring around (0,0) in fixed direction order: down, right.
        assert_eq!(log.visits()[0], Coord::new(1, 0));
        assert_eq!(log.visits()[1], Coord::new(0, 1));
        let path = log.path().unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn dfs_explores_up_first() {
        // From the centre of an open grid DFS must try `up` before anything
        // else, despite pushing onto a stack.
        let mut traversal = Traversal::new(
            open_grid(5),
            Coord::new(2, 2),
            Coord::new(4, 4),
            Strategy::Dfs,
        );
        let mut log = EventLog::new();
        run_to_end(&mut traversal, &mut log);
        assert_eq!(log.visits()[0], Coord::new(1, 2));
        assert_eq!(log.visits()[1], Coord::new(0, 2));
    }

    #[test]
    fn walled_off_end_exhausts_frontier() {
        let mut grid = MazeGrid::new(4);
        // Box in the end at (3,3).
        grid.set(&Coord::new(2, 3), CellKind::Wall);
        grid.set(&Coord::new(3, 2), CellKind::Wall);
        for strategy in Strategy::ALL {
            let mut traversal = Traversal::new(
                Arc::new(grid.clone()),
                Coord::new(0, 0),
                Coord::new(3, 3),
                strategy,
            );
            let mut log = EventLog::new();
            assert!(matches!(run_to_end(&mut traversal, &mut log), StepResult::Exhausted));
            assert!(log.no_path());
            assert!(log.path().is_none());
        }
    }

    #[test]
    fn astar_path_is_shortest() {
        let mut grid = MazeGrid::new(5);
        for col in 0..4 {
            grid.set(&Coord::new(2, col), CellKind::Wall);
        }
        let mut traversal = Traversal::new(
            Arc::new(grid),
            Coord::new(0, 0),
            Coord::new(4, 0),
            Strategy::AStar,
        );
        let mut log = EventLog::new();
        run_to_end(&mut traversal, &mut log);
        let path = log.path().unwrap();
        // Detour around the wall row: 4 down + 2*4 sideways = 12 steps.
        assert_eq!(path.len(), 13);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(&pair[1]));
        }
    }
}
