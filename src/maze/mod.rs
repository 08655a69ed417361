pub mod cell;

use std::fmt;

pub use cell::Cell;

use crate::error::{MazeError, Result};

/// A grid coordinate `(x, y)`, with `x` the column and `y` the row.
pub type Coord = (u16, u16);

/// Rectangular grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    grid: Box<[Cell]>,
    width: u16,
    height: u16,
}

impl Maze {
    /// Creates a maze of the given size with every cell set to `fill`.
    pub fn new(width: u16, height: u16, fill: Cell) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be non-zero",
            });
        }
        let grid = vec![fill; width as usize * height as usize].into_boxed_slice();
        Ok(Maze {
            grid,
            width,
            height,
        })
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    /// Returns the category of the cell at `coord`, or `None` if it is out of bounds.
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        self.is_in_bounds(coord)
            .then(|| self.grid[self.ravel_index(coord.0, coord.1)])
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    /// Checks if the given coordinate lies on the outer border of the maze.
    pub fn is_boundary(&self, coord: Coord) -> bool {
        let (x, y) = coord;
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Checks if the given coordinate is in bounds and can be stepped on.
    pub fn is_open(&self, coord: Coord) -> bool {
        self.cell_at(coord).is_some_and(Cell::is_open)
    }

    /// The cells generators mark as `Start` and `End`: one cell in from the top-left and
    /// bottom-right corners.
    pub fn default_endpoints(&self) -> (Coord, Coord) {
        (
            (1, 1),
            (self.width.saturating_sub(2), self.height.saturating_sub(2)),
        )
    }

    /// Iterates over every coordinate holding the given category, row by row.
    #[cfg(test)]
    pub(crate) fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |&coord| self[coord] == cell)
    }

    /// Sets every cell on the outer border to `Wall`.
    pub fn wall_border(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_boundary((x, y)) {
                    self[(x, y)] = Cell::Wall;
                }
            }
        }
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.is_in_bounds(index),
            "The given coordinate {:?} is out of bounds",
            index
        );
        &self.grid[self.ravel_index(index.0, index.1)]
    }
}

impl std::ops::IndexMut<Coord> for Maze {
    fn index_mut(&mut self, index: Coord) -> &mut Self::Output {
        assert!(
            self.is_in_bounds(index),
            "The given coordinate {:?} is out of bounds",
            index
        );
        let idx = self.ravel_index(index.0, index.1);
        &mut self.grid[idx]
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self[(x, y)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Get neighbors of a cell.
/// A neighbor is a cell one step away in a cardinal direction, returned in the order
/// right, left, down, up. Out of bounds neighbors are skipped.
pub fn get_neighbors(coord: Coord, maze: &Maze) -> impl Iterator<Item = Coord> + '_ {
    let (x, y) = coord;
    // NOTE: When x < 1 or y < 1, x - 1 or y - 1 wraps to u16::MAX, and when x + 1 or y + 1
    // would overflow it saturates to u16::MAX. Either way the comparison against the
    // dimensions filters it out, as the largest valid index is u16::MAX - 1.
    [
        (x.saturating_add(1), y),
        (x.wrapping_sub(1), y),
        (x, y.saturating_add(1)),
        (x, y.wrapping_sub(1)),
    ]
    .into_iter()
    .filter(move |&c| maze.is_in_bounds(c))
}

/// Whether two coordinates are one cardinal step apart.
#[cfg(test)]
pub(crate) fn is_adjacent(a: Coord, b: Coord) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

/// Builds a maze with a wall border and an open interior, for tests.
#[cfg(test)]
pub(crate) fn open_room(width: u16, height: u16) -> Maze {
    let mut maze = Maze::new(width, height, Cell::Space).expect("valid test dimensions");
    maze.wall_border();
    maze
}
