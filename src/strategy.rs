use crate::coord::Coord;
use crate::frontier::Frontier;
use core::fmt;

/// The five expansion-order policies sharing one traversal skeleton.
///
/// On a unit-cost 4-connected grid, [Bfs](Strategy::Bfs),
/// [Dijkstra](Strategy::Dijkstra) and [AStar](Strategy::AStar) always return
/// a shortest path; [Dfs](Strategy::Dfs) and
/// [GreedyBestFirst](Strategy::GreedyBestFirst) make no optimality guarantee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// FIFO expansion; first enqueue wins.
    Bfs,
    /// LIFO expansion; neighbours are pushed in reverse of the fixed
    /// direction order so that `up` is explored first despite stack
    /// semantics.
    Dfs,
    /// Lowest f = g + Manhattan heuristic; relaxation re-admits improved
    /// nodes to the frontier.
    AStar,
    /// Lowest cumulative cost g; same relaxation as A* with a zero
    /// heuristic.
    Dijkstra,
    /// Lowest Manhattan heuristic only; predecessor set once on first
    /// discovery, never revised.
    GreedyBestFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::AStar,
        Strategy::Dijkstra,
        Strategy::GreedyBestFirst,
    ];

    pub(crate) fn frontier(&self) -> Frontier {
        match self {
            Strategy::Bfs => Frontier::fifo(),
            Strategy::Dfs => Frontier::lifo(),
            Strategy::AStar | Strategy::Dijkstra | Strategy::GreedyBestFirst => {
                Frontier::priority()
            }
        }
    }

    /// The score a node enters the frontier with. Meaningless (and unused)
    /// for the unscored disciplines.
    pub(crate) fn priority(&self, cost: i32, coord: &Coord, end: &Coord) -> i32 {
        match self {
            Strategy::Bfs | Strategy::Dfs => 0,
            Strategy::Dijkstra => cost,
            Strategy::AStar => cost + coord.manhattan_distance(end),
            Strategy::GreedyBestFirst => coord.manhattan_distance(end),
        }
    }

    /// Whether a cheaper rediscovery updates the predecessor and cost and
    /// re-admits the node to the frontier.
    pub(crate) fn relaxes(&self) -> bool {
        matches!(self, Strategy::AStar | Strategy::Dijkstra)
    }

    /// Whether neighbours are pushed in reverse of the fixed direction order.
    pub(crate) fn reverses_expansion(&self) -> bool {
        matches!(self, Strategy::Dfs)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::AStar => "A*",
            Strategy::Dijkstra => "Dijkstra",
            Strategy::GreedyBestFirst => "greedy best-first",
        };
        write!(f, "{}", name)
    }
}
