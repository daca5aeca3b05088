//! Property tests for the search engine: checks on many seeded random grids
//! that every strategy upholds its contract, with BFS path lengths verified
//! against an independent reference shortest-path computation.

use maze_pathfinding::{
    CellKind, Coord, EventLog, MazeGrid, RunController, RunStatus, SearchSink, Strategy,
};
use rand::prelude::*;
use std::collections::VecDeque;
use std::sync::Arc;

fn random_grid(n: usize, wall_probability: f64, rng: &mut StdRng) -> MazeGrid {
    let mut maze = MazeGrid::random(n, wall_probability, rng);
    // Endpoints must be passable before a run starts.
    maze.set(&Coord::new(0, 0), CellKind::Open);
    maze.set(&Coord::new(n as i32 - 1, n as i32 - 1), CellKind::Open);
    maze
}

fn run(
    grid: &Arc<MazeGrid>,
    start: Coord,
    end: Coord,
    strategy: Strategy,
) -> (RunStatus, EventLog) {
    let mut controller = RunController::new();
    let mut run = controller
        .start_run(grid.clone(), start, end, strategy)
        .unwrap();
    let mut log = EventLog::new();
    let status = run.drive(&mut log);
    (status, log)
}

/// Plain distance-map BFS, independent of the engine, used as the
/// shortest-path oracle. Returns the number of steps from start to end.
fn reference_distance(grid: &MazeGrid, start: Coord, end: Coord) -> Option<usize> {
    let n = grid.size() as i32;
    let mut dist = vec![vec![usize::MAX; n as usize]; n as usize];
    let mut queue = VecDeque::new();
    dist[start.row as usize][start.col as usize] = 0;
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        if current == end {
            return Some(dist[current.row as usize][current.col as usize]);
        }
        let d = dist[current.row as usize][current.col as usize];
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let next = Coord::new(current.row + dr, current.col + dc);
            if grid.is_passable(&next) && dist[next.row as usize][next.col as usize] == usize::MAX {
                dist[next.row as usize][next.col as usize] = d + 1;
                queue.push_back(next);
            }
        }
    }
    None
}

fn assert_valid_path(grid: &MazeGrid, path: &[Coord], start: Coord, end: Coord) {
    assert_eq!(*path.first().unwrap(), start);
    assert_eq!(*path.last().unwrap(), end);
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "non-adjacent path step {} -> {}",
            pair[0],
            pair[1]
        );
    }
    for coord in path {
        assert!(grid.is_passable(coord), "path crosses wall at {}", coord);
    }
}

#[test]
fn fuzz_against_reference_shortest_path() {
    const N: usize = 10;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Coord::new(0, 0);
    let end = Coord::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = Arc::new(random_grid(N, 0.4, &mut rng));
        let reference = reference_distance(&grid, start, end);
        // The components query must agree with the oracle on reachability.
        assert_eq!(grid.reachable(&start, &end), reference.is_some());

        let (bfs_status, bfs_log) = run(&grid, start, end, Strategy::Bfs);
        match reference {
            Some(steps) => {
                assert_eq!(bfs_status, RunStatus::Completed);
                let bfs_path = bfs_log.path().unwrap();
                assert_eq!(bfs_path.len(), steps + 1, "BFS path is not shortest");
                assert_valid_path(&grid, bfs_path, start, end);

                // Unit edge weight makes Dijkstra and A* optimal as well.
                for strategy in [Strategy::Dijkstra, Strategy::AStar] {
                    let (status, log) = run(&grid, start, end, strategy);
                    assert_eq!(status, RunStatus::Completed);
                    let path = log.path().unwrap();
                    assert_eq!(path.len(), bfs_path.len(), "{} path is not shortest", strategy);
                    assert_valid_path(&grid, path, start, end);
                }
                // DFS and greedy must still find a path, possibly longer.
                for strategy in [Strategy::Dfs, Strategy::GreedyBestFirst] {
                    let (status, log) = run(&grid, start, end, strategy);
                    assert_eq!(status, RunStatus::Completed);
                    let path = log.path().unwrap();
                    assert!(path.len() >= bfs_path.len());
                    assert_valid_path(&grid, path, start, end);
                }
            }
            None => {
                for strategy in Strategy::ALL {
                    let (status, log) = run(&grid, start, end, strategy);
                    assert_eq!(status, RunStatus::NoPath);
                    assert!(log.no_path());
                    assert!(log.path().is_none());
                }
            }
        }
    }
}

#[test]
fn identical_runs_visit_identically() {
    const N: usize = 12;
    let mut rng = StdRng::seed_from_u64(42);
    let start = Coord::new(0, 0);
    let end = Coord::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..50 {
        let grid = Arc::new(random_grid(N, 0.3, &mut rng));
        for strategy in Strategy::ALL {
            let (status_a, log_a) = run(&grid, start, end, strategy);
            let (status_b, log_b) = run(&grid, start, end, strategy);
            assert_eq!(status_a, status_b);
            assert_eq!(log_a.events, log_b.events, "{} is not deterministic", strategy);
        }
    }
}

#[test]
fn start_equals_end_is_immediate_for_every_strategy() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = Arc::new(random_grid(8, 0.3, &mut rng));
    let start = Coord::new(0, 0);
    for strategy in Strategy::ALL {
        let (status, log) = run(&grid, start, start, strategy);
        assert_eq!(status, RunStatus::Completed);
        assert_eq!(log.path(), Some(&[start][..]));
        assert!(log.visits().is_empty());
    }
}

#[test]
fn open_five_by_five_scenario() {
    let grid = Arc::new(MazeGrid::new(5));
    let start = Coord::new(0, 0);
    let end = Coord::new(4, 4);
    let (status, log) = run(&grid, start, end, Strategy::Bfs);
    assert_eq!(status, RunStatus::Completed);
    let path = log.path().unwrap();
    // 8 steps, 9 coordinates.
    assert_eq!(path.len(), 9);
    assert_valid_path(&grid, path, start, end);

    // All 24 cells besides the start get settled before the goal pops; the
    // visit stream excludes start and end, leaving 23 events.
    let visits = log.visits();
    assert_eq!(visits.len(), 23);
    assert!(!visits.contains(&start));
    assert!(!visits.contains(&end));

    // FIFO expansion settles cells in non-decreasing true distance.
    let mut last = 0;
    for coord in &visits {
        let d = start.manhattan_distance(coord);
        assert!(d >= last, "FIFO order violated at {}", coord);
        last = d;
    }
}

#[test]
fn boxed_in_start_reports_no_path_without_visits() {
    let mut grid = MazeGrid::new(6);
    for dir in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        grid.set(&Coord::new(2 + dir.0, 2 + dir.1), CellKind::Wall);
    }
    let grid = Arc::new(grid);
    for strategy in Strategy::ALL {
        let (status, log) = run(&grid, Coord::new(2, 2), Coord::new(5, 5), strategy);
        assert_eq!(status, RunStatus::NoPath);
        assert!(log.no_path());
        assert!(log.visits().is_empty());
    }
}

/// A sink that cancels through the run handle after the k-th visit.
struct CancelAfter {
    inner: EventLog,
    handle: maze_pathfinding::RunHandle,
    remaining: usize,
}

impl SearchSink for CancelAfter {
    fn on_visit(&mut self, coord: Coord) {
        self.inner.on_visit(coord);
        self.remaining -= 1;
        if self.remaining == 0 {
            self.handle.cancel();
        }
    }
    fn on_path(&mut self, path: &[Coord]) {
        self.inner.on_path(path);
    }
    fn on_no_path(&mut self) {
        self.inner.on_no_path();
    }
}

#[test]
fn cancelling_after_k_visits_silences_the_run() {
    let grid = Arc::new(MazeGrid::new(8));
    let start = Coord::new(0, 0);
    let end = Coord::new(7, 7);
    for strategy in Strategy::ALL {
        for k in [1, 4] {
            let mut controller = RunController::new();
            let mut active = controller
                .start_run(grid.clone(), start, end, strategy)
                .unwrap();
            let mut sink = CancelAfter {
                inner: EventLog::new(),
                handle: active.handle(),
                remaining: k,
            };
            let status = active.drive(&mut sink);
            assert_eq!(status, RunStatus::Cancelled);
            assert_eq!(sink.inner.visits().len(), k, "{}: extra visit after cancel", strategy);
            assert!(sink.inner.path().is_none());
            assert!(!sink.inner.no_path());
        }
    }
}
