use crate::coord::Coord;
use crate::engine::{StepResult, Traversal};
use crate::error::{Endpoint, SearchError};
use crate::grid::MazeGrid;
use crate::sink::SearchSink;
use crate::strategy::Strategy;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Lifecycle of a run. A run starts `Running` and reaches exactly one of
/// the three terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
    NoPath,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        *self != RunStatus::Running
    }
}

/// Cooperative cancellation flag, consulted by the traversal loop at the
/// top of every iteration. Setting it never unwinds in-progress work.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cloneable view of one run, usable for cancellation and status
/// inspection. A renderer typically keeps one so it can cancel the run
/// from inside a sink callback.
#[derive(Clone, Debug)]
pub struct RunHandle {
    token: CancelToken,
    status: Arc<Mutex<RunStatus>>,
}

impl RunHandle {
    fn new() -> RunHandle {
        RunHandle {
            token: CancelToken::new(),
            status: Arc::new(Mutex::new(RunStatus::Running)),
        }
    }

    pub fn status(&self) -> RunStatus {
        *self.status.lock().unwrap()
    }

    /// A clone of the run's cancellation flag, for callers that only need
    /// to request cancellation. Setting it takes effect at the next loop
    /// checkpoint; the status moves to Cancelled when the flag is observed.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Requests cancellation. Idempotent; a no-op if the run has already
    /// reached a terminal status. The run emits no further events once the
    /// flag is observed, not even a terminal one. Unlike cancelling through
    /// the bare token, this also moves the status to Cancelled right away,
    /// so it stays truthful for runs that are never stepped again.
    pub fn cancel(&self) {
        let mut status = self.status.lock().unwrap();
        if *status == RunStatus::Running {
            *status = RunStatus::Cancelled;
        }
        self.token.cancel();
    }

    fn finish(&self, terminal: RunStatus) {
        debug_assert!(terminal.is_terminal());
        let mut status = self.status.lock().unwrap();
        if *status == RunStatus::Running {
            *status = terminal;
        }
    }
}

/// One active traversal: the per-run frontier, bookkeeping maps and a
/// handle. The caller drives it, either to completion with
/// [drive](Run::drive) or one iteration at a time with [step](Run::step)
/// when event consumption should set the pace.
#[derive(Debug)]
pub struct Run {
    traversal: Traversal,
    handle: RunHandle,
}

impl Run {
    pub fn handle(&self) -> RunHandle {
        self.handle.clone()
    }

    pub fn status(&self) -> RunStatus {
        self.handle.status()
    }

    /// One traversal loop iteration. The cancellation flag is consulted
    /// first, so a cancelled or otherwise terminated run is a no-op that
    /// returns its status; no event is ever emitted past termination.
    pub fn step<S: SearchSink>(&mut self, sink: &mut S) -> RunStatus {
        let status = self.handle.status();
        if status.is_terminal() {
            return status;
        }
        if self.handle.token.is_cancelled() {
            self.handle.finish(RunStatus::Cancelled);
            return RunStatus::Cancelled;
        }
        match self.traversal.step(sink) {
            StepResult::Settled | StepResult::Skipped => RunStatus::Running,
            StepResult::Completed => {
                self.handle.finish(RunStatus::Completed);
                self.handle.status()
            }
            StepResult::Exhausted => {
                self.handle.finish(RunStatus::NoPath);
                self.handle.status()
            }
        }
    }

    /// Steps the traversal until it reaches a terminal status.
    pub fn drive<S: SearchSink>(&mut self, sink: &mut S) -> RunStatus {
        loop {
            let status = self.step(sink);
            if status.is_terminal() {
                return status;
            }
        }
    }
}

/// Owns at most one active run. Starting a new run while one is running
/// first cancels the old one, so only one run is ever active system-wide.
#[derive(Debug, Default)]
pub struct RunController {
    active: Option<RunHandle>,
}

impl RunController {
    pub fn new() -> RunController {
        RunController::default()
    }

    /// Validates the endpoints and constructs a run in status
    /// [Running](RunStatus::Running). Any previously active run is
    /// cancelled synchronously before the new one is built.
    pub fn start_run(
        &mut self,
        grid: Arc<MazeGrid>,
        start: Coord,
        end: Coord,
        strategy: Strategy,
    ) -> Result<Run, SearchError> {
        if let Some(previous) = self.active.take() {
            if previous.status() == RunStatus::Running {
                warn!("starting a new run while one is active; cancelling the old run");
            }
            previous.cancel();
        }
        if !grid.is_passable(&start) {
            return Err(SearchError::InvalidEndpoint {
                endpoint: Endpoint::Start,
                coord: start,
            });
        }
        if !grid.is_passable(&end) {
            return Err(SearchError::InvalidEndpoint {
                endpoint: Endpoint::End,
                coord: end,
            });
        }
        info!("starting {} run from {} to {}", strategy, start, end);
        let handle = RunHandle::new();
        self.active = Some(handle.clone());
        Ok(Run {
            traversal: Traversal::new(grid, start, end, strategy),
            handle,
        })
    }

    /// The handle of the most recently started run, if any.
    pub fn active(&self) -> Option<&RunHandle> {
        self.active.as_ref()
    }

    /// Cancels any active run and returns to the idle state. Per-run maps
    /// and sets live in the [Run] value and are dropped with it.
    pub fn reset(&mut self) {
        if let Some(previous) = self.active.take() {
            previous.cancel();
        }
    }
}
