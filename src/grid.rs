use crate::coord::{Coord, Direction};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;

/// What a single grid cell holds. Walls are impassable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    Open,
    Wall,
}

/// [MazeGrid] is the obstacle matrix a run searches over: a square [BoolGrid]
/// where [true] marks a wall, plus a [UnionFind] over the open cells so
/// callers can cheaply ask whether two coordinates are connected before
/// starting a run. The traversal loop itself never consults the components;
/// an unreachable goal surfaces as frontier exhaustion so the visit stream
/// stays well-defined.
///
/// The grid is treated as read-only for the duration of a run.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    grid: BoolGrid,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl MazeGrid {
    /// Creates an all-open `size`x`size` grid.
    pub fn new(size: usize) -> MazeGrid {
        let mut maze = MazeGrid {
            grid: BoolGrid::new(size, size, false),
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        maze.generate_components();
        maze
    }

    /// Generates a `size`x`size` grid where each cell is independently a wall
    /// with probability `wall_probability`. Components are generated before
    /// returning. Callers wanting solvable instances check [reachable](Self::reachable)
    /// and regenerate or clear cells as needed.
    pub fn random<R: Rng>(size: usize, wall_probability: f64, rng: &mut R) -> MazeGrid {
        let mut maze = MazeGrid::new(size);
        for row in 0..size as i32 {
            for col in 0..size as i32 {
                if rng.gen_bool(wall_probability) {
                    maze.grid.set(col as usize, row as usize, true);
                }
            }
        }
        maze.generate_components();
        maze
    }

    /// Side length of the square grid.
    pub fn size(&self) -> usize {
        self.grid.width
    }

    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.grid.height
            && (coord.col as usize) < self.grid.width
    }

    /// [false] if `coord` is out of bounds or a wall. This is the only
    /// passability query the engine uses; neighbour candidates are computed
    /// by stepping [Direction::ORDER] and filtering through this.
    pub fn is_passable(&self, coord: &Coord) -> bool {
        self.in_bounds(coord) && !self.grid.get(coord.col as usize, coord.row as usize)
    }

    pub fn get(&self, coord: &Coord) -> CellKind {
        if self.grid.get(coord.col as usize, coord.row as usize) {
            CellKind::Wall
        } else {
            CellKind::Open
        }
    }

    /// Updates a cell. Placing a wall flags the components as dirty since a
    /// component may have been split; clearing one joins the newly connected
    /// neighbours directly.
    pub fn set(&mut self, coord: &Coord, kind: CellKind) {
        let blocked = kind == CellKind::Wall;
        if self.grid.get(coord.col as usize, coord.row as usize) != blocked && blocked {
            self.components_dirty = true;
        } else if !blocked {
            let ix = self.cell_ix(coord);
            for dir in Direction::ORDER {
                let n = coord.step(dir);
                if self.is_passable(&n) {
                    let n_ix = self.cell_ix(&n);
                    self.components.union(ix, n_ix);
                }
            }
        }
        self.grid.set(coord.col as usize, coord.row as usize, blocked);
    }

    fn cell_ix(&self, coord: &Coord) -> usize {
        self.grid.get_ix(coord.col as usize, coord.row as usize)
    }

    /// Checks if start and end are on the same connected component.
    pub fn reachable(&self, start: &Coord, end: &Coord) -> bool {
        !self.unreachable(start, end)
    }

    /// Checks if start and end are not on the same connected component.
    pub fn unreachable(&self, start: &Coord, end: &Coord) -> bool {
        if self.in_bounds(start) && self.in_bounds(end) {
            let start_ix = self.cell_ix(start);
            let end_ix = self.cell_ix(end);
            !self.components.equiv(start_ix, end_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open 4-neighbours
    /// to the same components.
    pub fn generate_components(&mut self) {
        info!("generating connected components for {0}x{0} grid", self.size());
        let n = self.size();
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for row in 0..n as i32 {
            for col in 0..n as i32 {
                let coord = Coord::new(row, col);
                if !self.is_passable(&coord) {
                    continue;
                }
                let ix = self.cell_ix(&coord);
                // Down and right suffice: up/left unions were made when those
                // cells were the parent.
                for neighbour in [coord.step(Direction::Down), coord.step(Direction::Right)] {
                    if self.is_passable(&neighbour) {
                        let neighbour_ix = self.cell_ix(&neighbour);
                        self.components.union(ix, neighbour_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size() as i32 {
            for col in 0..self.size() as i32 {
                let c = if self.is_passable(&Coord::new(row, col)) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
