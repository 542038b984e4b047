use std::{collections::HashSet, fmt};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{BoardError, Bounds, Cell};

/// The ground truth a player reveals cells against.
pub trait Board {
    fn bounds(&self) -> Bounds;

    fn is_mine(&self, cell: Cell) -> bool;

    /// The number of mines adjacent to `cell`, not counting `cell` itself.
    fn nearby_mines(&self, cell: Cell) -> u8 {
        let count = self
            .bounds()
            .neighbors(cell)
            .filter(|&neighbor| self.is_mine(neighbor))
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }
}

/// A board with a fixed set of mines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minesweeper {
    bounds: Bounds,
    mines: HashSet<Cell>,
}

impl Minesweeper {
    /// Places `mines` mines uniformly at random.
    pub fn random<R>(bounds: Bounds, mines: usize, rng: &mut R) -> Result<Self, BoardError>
    where
        R: Rng + ?Sized,
    {
        let cells = bounds.area();
        if mines > cells {
            return Err(BoardError::TooManyMines { mines, cells });
        }
        let mines = rand::seq::index::sample(rng, cells, mines)
            .into_iter()
            .map(|index| bounds.cell_at(index))
            .collect();
        Ok(Self { bounds, mines })
    }

    /// A board with mines exactly at `mines`.
    pub fn with_mines(
        bounds: Bounds,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, BoardError> {
        let mines: HashSet<Cell> = mines.into_iter().collect();
        if let Some(&cell) = mines.iter().find(|&&cell| !bounds.contains(cell)) {
            return Err(BoardError::MineOutOfBounds { cell, bounds });
        }
        Ok(Self { bounds, mines })
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// Whether `flagged` is exactly the set of mines.
    pub fn won(&self, flagged: &HashSet<Cell>) -> bool {
        *flagged == self.mines
    }
}

impl Board for Minesweeper {
    fn bounds(&self) -> Bounds {
        self.bounds
    }

    fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }
}

impl fmt::Display for Minesweeper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "--".repeat(self.bounds.width) + "-";
        for row in 0..self.bounds.height {
            writeln!(f, "{separator}")?;
            for col in 0..self.bounds.width {
                let mark = if self.is_mine(Cell { row, col }) { 'X' } else { ' ' };
                write!(f, "|{mark}")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{separator}")
    }
}
