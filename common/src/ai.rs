use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{Bounds, Cell, Deduction, KnowledgeBase, KnowledgeError, Sentence};

/// A minesweeper player that deduces safe cells and mines from the counts the
/// board reveals.
///
/// The sets of moves made, safe cells and mines only ever grow. Every cell in
/// `moves_made` is in `safes`, and no cell is both safe and a mine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinesweeperAi {
    bounds: Bounds,
    moves_made: HashSet<Cell>,
    safes: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: KnowledgeBase,
}

impl MinesweeperAi {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            moves_made: HashSet::new(),
            safes: HashSet::new(),
            mines: HashSet::new(),
            knowledge: KnowledgeBase::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    pub fn safes(&self) -> &HashSet<Cell> {
        &self.safes
    }

    pub fn mines(&self) -> &HashSet<Cell> {
        &self.mines
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Records `cell` as a mine and strips it from every sentence.
    ///
    /// Returns `Ok(false)` if the mine was already known.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        self.check_bounds(cell)?;
        if self.safes.contains(&cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        self.knowledge.mark_mine(cell)?;
        Ok(self.mines.insert(cell))
    }

    /// Records `cell` as safe and strips it from every sentence.
    ///
    /// Returns `Ok(false)` if the cell was already known to be safe.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool, KnowledgeError> {
        self.check_bounds(cell)?;
        if self.mines.contains(&cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        self.knowledge.mark_safe(cell)?;
        Ok(self.safes.insert(cell))
    }

    /// Takes in that the board revealed `cell`, safe, with `count` mines among
    /// its neighbors, and draws every conclusion subset elimination reaches.
    ///
    /// The observation is validated before any state changes, so a rejected
    /// call leaves the player as it was. An error raised while drawing
    /// conclusions means earlier observations contradict each other.
    pub fn add_knowledge(&mut self, cell: Cell, count: u8) -> Result<(), KnowledgeError> {
        self.check_bounds(cell)?;
        if self.moves_made.contains(&cell) {
            return Err(KnowledgeError::AlreadyRevealed { cell });
        }
        if self.mines.contains(&cell) {
            return Err(KnowledgeError::KnownMine { cell });
        }

        let inconsistent = KnowledgeError::InconsistentCount { cell, count };
        let mut remaining = usize::from(count);
        let mut unknown = HashSet::new();
        for neighbor in self.bounds.neighbors(cell) {
            if self.mines.contains(&neighbor) {
                remaining = remaining.checked_sub(1).ok_or(inconsistent.clone())?;
            } else if !self.safes.contains(&neighbor) {
                unknown.insert(neighbor);
            }
        }
        if remaining > unknown.len() {
            return Err(inconsistent);
        }

        self.mark_safe(cell)?;
        self.moves_made.insert(cell);
        self.learn(Sentence::new(unknown, remaining)?)?;
        self.infer()
    }

    /// A cell known to be safe that has not been revealed yet.
    ///
    /// Picks the first such cell in row-major order.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes.difference(&self.moves_made).min().copied()
    }

    /// A uniformly chosen cell that has not been revealed and is not a known
    /// mine.
    pub fn make_random_move<R>(&self, rng: &mut R) -> Option<Cell>
    where
        R: Rng + ?Sized,
    {
        let candidates: Vec<Cell> = self
            .bounds
            .cells()
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates.choose(rng).copied()
    }

    fn check_bounds(&self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.bounds.contains(cell) {
            Ok(())
        } else {
            Err(KnowledgeError::OutOfBounds {
                cell,
                bounds: self.bounds,
            })
        }
    }

    /// Adds `sentence` after removing the cells that are already classified.
    fn learn(&mut self, sentence: Sentence) -> Result<bool, KnowledgeError> {
        let mut mines = 0;
        let mut cells = HashSet::new();
        for &cell in sentence.cells() {
            if self.mines.contains(&cell) {
                mines += 1;
            } else if !self.safes.contains(&cell) {
                cells.insert(cell);
            }
        }
        let count = match sentence.count().checked_sub(mines) {
            Some(count) if count <= cells.len() => count,
            _ => return Err(KnowledgeError::Unsatisfiable { sentence }),
        };

        let sentence = Sentence::new(cells, count)?;
        let added = self.knowledge.insert(sentence.clone());
        if added {
            log::debug!("learned {sentence}");
        }
        Ok(added)
    }

    /// Applies subset elimination and resolves settled sentences until a
    /// pass changes nothing.
    fn infer(&mut self) -> Result<(), KnowledgeError> {
        for pass in 1usize.. {
            let mut changed = false;

            for deduction in self.knowledge.subset_eliminations()? {
                match deduction {
                    Deduction::Safes(cells) => {
                        log::debug!("subset elimination proves {} safe cells", cells.len());
                        for cell in cells {
                            changed |= self.mark_safe(cell)?;
                        }
                    }
                    Deduction::Mines(cells) => {
                        log::debug!("subset elimination proves {} mines", cells.len());
                        for cell in cells {
                            changed |= self.mark_mine(cell)?;
                        }
                    }
                    Deduction::Derived(sentence) => {
                        changed |= self.learn(sentence)?;
                    }
                }
            }

            changed |= self.knowledge.dedup();

            for sentence in self.knowledge.take_resolved() {
                changed = true;
                if sentence.count() == 0 {
                    for &cell in sentence.cells() {
                        self.mark_safe(cell)?;
                    }
                } else {
                    for &cell in sentence.cells() {
                        self.mark_mine(cell)?;
                    }
                }
            }

            log::trace!(
                "pass {pass}: {} sentences, {} safes, {} mines",
                self.knowledge.len(),
                self.safes.len(),
                self.mines.len()
            );
            if !changed {
                break;
            }
        }
        Ok(())
    }
}
