use core::fmt;

/// A cell position on the grid, addressed as (row, col) with row 0 at the top.
/// Compares and hashes by value so it can be used as a map or set key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn new(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    /// Manhattan distance to `other`. Admissible and consistent as a goal
    /// heuristic on a unit-cost 4-connected grid.
    pub fn manhattan_distance(&self, other: &Coord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The neighbouring coordinate one step in `dir`. May be out of bounds;
    /// callers filter through [MazeGrid::is_passable](crate::MazeGrid::is_passable).
    pub fn step(&self, dir: Direction) -> Coord {
        let (dr, dc) = dir.offset();
        Coord::new(self.row + dr, self.col + dc)
    }

    /// Whether `other` is exactly one unit step away along one axis.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four unit moves. [Direction::ORDER] fixes the expansion order used
/// everywhere; it is significant for deterministic visit sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed expansion order: up, down, left, right.
    pub const ORDER: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}
