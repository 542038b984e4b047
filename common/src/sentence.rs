use std::{collections::HashSet, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Cell, KnowledgeError};

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// Two sentences are equal when they hold the same cells and the same count.
/// `count` never exceeds the number of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    cells: HashSet<Cell>,
    count: usize,
}

impl Sentence {
    /// Fails if `count` is larger than the number of distinct cells.
    pub fn new(
        cells: impl IntoIterator<Item = Cell>,
        count: usize,
    ) -> Result<Self, KnowledgeError> {
        let cells: HashSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(KnowledgeError::OverfullSentence {
                count,
                cells: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Whether every cell of `self` also appears in `other`.
    pub fn is_subset(&self, other: &Sentence) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Returns every cell if all of them must be mines.
    pub fn known_mines(&self) -> Option<&HashSet<Cell>> {
        (self.count == self.cells.len()).then_some(&self.cells)
    }

    /// Returns every cell if none of them can be a mine.
    pub fn known_safes(&self) -> Option<&HashSet<Cell>> {
        (self.count == 0).then_some(&self.cells)
    }

    /// Removes `cell` as a known mine, which also takes one off the count.
    ///
    /// Fails without changing anything if no mine is left for `cell`.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if !self.cells.contains(&cell) {
            return Ok(());
        }
        self.count = self
            .count
            .checked_sub(1)
            .ok_or(KnowledgeError::Contradiction { cell })?;
        self.cells.remove(&cell);
        Ok(())
    }

    /// Removes `cell` as a known safe cell. The count is unchanged.
    ///
    /// Fails without changing anything if every cell must be a mine.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.contains(cell) && self.count == self.cells.len() {
            return Err(KnowledgeError::Contradiction { cell });
        }
        self.cells.remove(&cell);
        Ok(())
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}} = {}",
            self.cells.iter().sorted().format(", "),
            self.count
        )
    }
}
