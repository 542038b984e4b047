use std::fmt;

use serde::{Deserialize, Serialize};

/// A coordinate on the minesweeper board.
///
/// Cells order row-major, which is the order every enumeration in this crate
/// uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The fixed dimensions of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bounds {
    pub height: usize,
    pub width: usize,
}

impl Bounds {
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Total number of cells on the board.
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// All cells of the board in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell { row, col }))
    }

    /// Row-major index of `cell`, the inverse of `cell_at`.
    pub fn index_of(&self, cell: Cell) -> usize {
        cell.row * self.width + cell.col
    }

    pub fn cell_at(&self, index: usize) -> Cell {
        Cell {
            row: index / self.width,
            col: index % self.width,
        }
    }

    /// The in-bounds cells adjacent to `cell`, diagonals included, excluding
    /// `cell` itself.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        let height = self.height as isize;
        let width = self.width as isize;

        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    return None;
                }

                let row = cell.row as isize + dr;
                let col = cell.col as isize + dc;

                if row >= 0 && row < height && col >= 0 && col < width {
                    Some(Cell {
                        row: row as usize,
                        col: col as usize,
                    })
                } else {
                    None
                }
            })
        })
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}
