use crate::coord::Coord;

/// The engine's output boundary. A consumer (typically a renderer) receives
/// zero or more visit notifications followed by at most one terminal event:
/// a reconstructed path on success or a no-path notification on frontier
/// exhaustion. A cancelled run emits no terminal event at all.
///
/// The engine makes no timing guarantees between events; any display pacing
/// is the consumer's concern.
pub trait SearchSink {
    /// A coordinate was settled. The start and end coordinates are never
    /// reported here.
    fn on_visit(&mut self, coord: Coord);

    /// A path from start to end inclusive was found. Consecutive
    /// coordinates are 4-adjacent.
    fn on_path(&mut self, path: &[Coord]);

    /// The frontier emptied without reaching the end.
    fn on_no_path(&mut self);
}

/// One recorded engine event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    Visited(Coord),
    Path(Vec<Coord>),
    NoPath,
}

/// A sink that records every event in order. Used by tests and by
/// replay-style renderers that pace playback themselves.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<SearchEvent>,
}

impl EventLog {
    pub fn new() -> EventLog {
        EventLog::default()
    }

    /// The visited coordinates in emission order.
    pub fn visits(&self) -> Vec<Coord> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SearchEvent::Visited(coord) => Some(*coord),
                _ => None,
            })
            .collect()
    }

    /// The path from the terminal event, if the run completed successfully.
    pub fn path(&self) -> Option<&[Coord]> {
        self.events.iter().find_map(|event| match event {
            SearchEvent::Path(path) => Some(path.as_slice()),
            _ => None,
        })
    }

    pub fn no_path(&self) -> bool {
        self.events.contains(&SearchEvent::NoPath)
    }
}

impl SearchSink for EventLog {
    fn on_visit(&mut self, coord: Coord) {
        self.events.push(SearchEvent::Visited(coord));
    }

    fn on_path(&mut self, path: &[Coord]) {
        self.events.push(SearchEvent::Path(path.to_vec()));
    }

    fn on_no_path(&mut self) {
        self.events.push(SearchEvent::NoPath);
    }
}

/// A sink that discards everything. Useful for benchmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SearchSink for NullSink {
    fn on_visit(&mut self, _coord: Coord) {}
    fn on_path(&mut self, _path: &[Coord]) {}
    fn on_no_path(&mut self) {}
}
