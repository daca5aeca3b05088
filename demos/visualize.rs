use maze_pathfinding::{
    CancelToken, Coord, EventLog, MazeGrid, RunController, RunStatus, SearchEvent, SearchSink,
    Strategy,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

// Generates a random 15x15 maze (the interactive UI's grid size and wall
// probability), picks a pair of connected endpoints and runs all five
// strategies on it, rendering the visited cells and the found path as ASCII.
//
// Rendering happens after the run from the recorded event log; a live
// renderer would instead pace `Run::step` itself.

const GRID_SIZE: usize = 15;
const WALL_PROBABILITY: f64 = 0.25;

fn pick_open(grid: &MazeGrid, rng: &mut StdRng) -> Coord {
    loop {
        let coord = Coord::new(
            rng.gen_range(0..GRID_SIZE as i32),
            rng.gen_range(0..GRID_SIZE as i32),
        );
        if grid.is_passable(&coord) {
            return coord;
        }
    }
}

fn render(grid: &MazeGrid, log: &EventLog, start: Coord, end: Coord) {
    let visited: Vec<Coord> = log.visits();
    let path: Vec<Coord> = log.path().map(|p| p.to_vec()).unwrap_or_default();
    for row in 0..GRID_SIZE as i32 {
        for col in 0..GRID_SIZE as i32 {
            let coord = Coord::new(row, col);
            let c = if coord == start {
                'S'
            } else if coord == end {
                'E'
            } else if path.contains(&coord) {
                'o'
            } else if visited.contains(&coord) {
                '+'
            } else if grid.is_passable(&coord) {
                '.'
            } else {
                '#'
            };
            print!("{}", c);
        }
        println!();
    }
}

/// A renderer-style sink that gives up after a fixed number of visits by
/// setting the run's cancel token from inside the callback. The engine
/// observes the flag at the next loop checkpoint and goes silent.
struct ImpatientRenderer {
    inner: EventLog,
    token: CancelToken,
    patience: usize,
}

impl SearchSink for ImpatientRenderer {
    fn on_visit(&mut self, coord: Coord) {
        self.inner.on_visit(coord);
        if self.inner.visits().len() == self.patience {
            self.token.cancel();
        }
    }
    fn on_path(&mut self, path: &[Coord]) {
        self.inner.on_path(path);
    }
    fn on_no_path(&mut self) {
        self.inner.on_no_path();
    }
}

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut grid = MazeGrid::random(GRID_SIZE, WALL_PROBABILITY, &mut rng);
    grid.update();
    let start = pick_open(&grid, &mut rng);
    let end = loop {
        let end = pick_open(&grid, &mut rng);
        if end != start && grid.reachable(&start, &end) {
            break end;
        }
    };
    let grid = Arc::new(grid);

    let mut controller = RunController::new();
    for strategy in Strategy::ALL {
        let mut run = controller
            .start_run(grid.clone(), start, end, strategy)
            .expect("endpoints were chosen passable");
        let mut log = EventLog::new();
        let status = run.drive(&mut log);

        println!("=== {} ===", strategy);
        render(&grid, &log, start, end);
        match status {
            RunStatus::Completed => {
                let path_len = log.path().map(|p| p.len()).unwrap_or(0);
                println!(
                    "visited {} cells, path of {} coordinates\n",
                    log.visits().len(),
                    path_len
                );
            }
            RunStatus::NoPath => println!("no path found\n"),
            status => println!("run ended with status {:?}\n", status),
        }
        // The terminal event is always last in the log.
        debug_assert!(matches!(
            log.events.last(),
            Some(SearchEvent::Path(_)) | Some(SearchEvent::NoPath)
        ));
    }

    // Cancellation from inside a sink callback: the renderer stops the BFS
    // run after a handful of visits and no further events arrive.
    let mut run = controller
        .start_run(grid.clone(), start, end, Strategy::Bfs)
        .expect("endpoints were chosen passable");
    let mut renderer = ImpatientRenderer {
        inner: EventLog::new(),
        token: run.handle().cancel_token(),
        patience: 10,
    };
    let status = run.drive(&mut renderer);
    println!("=== BFS, renderer gives up after 10 visits ===");
    render(&grid, &renderer.inner, start, end);
    match status {
        RunStatus::Cancelled => println!(
            "run cancelled after {} visits; no terminal event was emitted\n",
            renderer.inner.visits().len()
        ),
        status => println!(
            "run finished with status {:?} before the renderer lost patience\n",
            status
        ),
    }
}
