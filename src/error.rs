use crate::coord::Coord;
use core::fmt;
use thiserror::Error;

/// Which endpoint of a run an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

/// Errors surfaced synchronously when a run is requested. An exhausted
/// frontier or a cancelled run are terminal statuses, not errors.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end coordinate is out of bounds or on a wall. The run
    /// is rejected before any traversal begins.
    #[error("invalid {endpoint} endpoint {coord}: out of bounds or on a wall")]
    InvalidEndpoint { endpoint: Endpoint, coord: Coord },
}
