use std::collections::HashSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Cell, KnowledgeError, Sentence};

/// A conclusion drawn by comparing two sentences where one's cells are a
/// subset of the other's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deduction {
    /// Every cell is safe.
    Safes(HashSet<Cell>),
    /// Every cell is a mine.
    Mines(HashSet<Cell>),
    /// A new constraint on the cells the superset has beyond the subset.
    Derived(Sentence),
}

/// The sentences currently believed about the board, without duplicates.
///
/// Sentences never contain empty cell sets. Cells already classified as mines
/// or safes are stripped from every sentence through [`mark_mine`] and
/// [`mark_safe`].
///
/// [`mark_mine`]: KnowledgeBase::mark_mine
/// [`mark_safe`]: KnowledgeBase::mark_safe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    sentences: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter()
    }

    pub fn contains(&self, sentence: &Sentence) -> bool {
        self.sentences.contains(sentence)
    }

    /// Adds `sentence` unless it is empty or already present.
    ///
    /// Returns whether the knowledge base changed.
    pub fn insert(&mut self, sentence: Sentence) -> bool {
        if sentence.is_empty() || self.contains(&sentence) {
            return false;
        }
        self.sentences.push(sentence);
        true
    }

    /// Strips the mine `cell` from every sentence, or from none if some
    /// sentence has no mine left for it.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.forbids_mine(cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        self.sentences
            .iter_mut()
            .try_for_each(|sentence| sentence.mark_mine(cell))
    }

    /// Strips the safe `cell` from every sentence, or from none if some
    /// sentence needs it to be a mine.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<(), KnowledgeError> {
        if self.forbids_safe(cell) {
            return Err(KnowledgeError::Contradiction { cell });
        }
        self.sentences
            .iter_mut()
            .try_for_each(|sentence| sentence.mark_safe(cell))
    }

    /// Whether marking `cell` as a mine would break some sentence, i.e. a
    /// sentence containing it already has no mines left.
    pub fn forbids_mine(&self, cell: Cell) -> bool {
        self.sentences
            .iter()
            .any(|s| s.contains(cell) && s.count() == 0)
    }

    /// Whether marking `cell` as safe would break some sentence, i.e. every
    /// cell of a sentence containing it must be a mine.
    pub fn forbids_safe(&self, cell: Cell) -> bool {
        self.sentences
            .iter()
            .any(|s| s.contains(cell) && s.count() == s.len())
    }

    /// Compares every pair of sentences in both subset directions and collects
    /// what each subset relation proves.
    ///
    /// Sentences with identical cells and counts are duplicates and prove
    /// nothing; identical cells with different counts are a contradiction.
    pub fn subset_eliminations(&self) -> Result<Vec<Deduction>, KnowledgeError> {
        let mut deductions = Vec::new();

        for (a, b) in self.sentences.iter().tuple_combinations() {
            if a.is_subset(b) {
                deductions.extend(eliminate(a, b)?);
            }
            if b.is_subset(a) && a.len() != b.len() {
                deductions.extend(eliminate(b, a)?);
            }
        }

        Ok(deductions)
    }

    /// Drops repeated sentences, keeping the first of each.
    ///
    /// Marking cells can turn distinct sentences into equal ones.
    pub fn dedup(&mut self) -> bool {
        let before = self.sentences.len();
        let mut unique: Vec<Sentence> = Vec::with_capacity(before);
        for sentence in self.sentences.drain(..) {
            if !unique.contains(&sentence) {
                unique.push(sentence);
            }
        }
        self.sentences = unique;
        self.sentences.len() != before
    }

    /// Removes and returns every sentence whose cells are all mines or all
    /// safe, empty sentences included.
    pub fn take_resolved(&mut self) -> Vec<Sentence> {
        let (resolved, pending): (Vec<_>, Vec<_>) = self
            .sentences
            .drain(..)
            .partition(|s| s.known_mines().is_some() || s.known_safes().is_some());
        self.sentences = pending;
        resolved
    }
}

/// What `superset` says about the cells it has beyond `subset`.
fn eliminate(subset: &Sentence, superset: &Sentence) -> Result<Option<Deduction>, KnowledgeError> {
    let inconsistent = || KnowledgeError::InconsistentSentences {
        subset: subset.clone(),
        superset: superset.clone(),
    };

    let count = superset
        .count()
        .checked_sub(subset.count())
        .ok_or_else(inconsistent)?;
    let rest: HashSet<Cell> = superset
        .cells()
        .difference(subset.cells())
        .copied()
        .collect();

    if rest.len() < count {
        return Err(inconsistent());
    }
    if rest.is_empty() {
        return Ok(None);
    }

    let deduction = if count == 0 {
        Deduction::Safes(rest)
    } else if rest.len() == count {
        Deduction::Mines(rest)
    } else {
        Deduction::Derived(Sentence::new(rest, count)?)
    };
    Ok(Some(deduction))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(coords: &[(usize, usize)], count: usize) -> Sentence {
        Sentence::new(coords.iter().map(|&(r, c)| Cell::new(r, c)), count).unwrap()
    }

    fn cell_set(coords: &[(usize, usize)]) -> HashSet<Cell> {
        coords.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_insert_skips_duplicates_and_empty() {
        let mut kb = KnowledgeBase::new();
        assert!(kb.insert(sentence(&[(0, 0), (0, 1)], 1)));
        assert!(!kb.insert(sentence(&[(0, 1), (0, 0)], 1)));
        assert!(!kb.insert(sentence(&[], 0)));
        assert!(kb.insert(sentence(&[(0, 0), (0, 1)], 2)));
        assert_eq!(kb.len(), 2);
    }

    #[test]
    fn test_subset_equal_counts_proves_safes() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1), (0, 2)], 1));
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));

        let deductions = kb.subset_eliminations().unwrap();
        assert_eq!(deductions, vec![Deduction::Safes(cell_set(&[(0, 2)]))]);
    }

    #[test]
    fn test_subset_full_complement_proves_mines() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0)], 0));
        kb.insert(sentence(&[(0, 0), (0, 1), (1, 1)], 2));

        let deductions = kb.subset_eliminations().unwrap();
        assert_eq!(
            deductions,
            vec![Deduction::Mines(cell_set(&[(0, 1), (1, 1)]))]
        );
    }

    #[test]
    fn test_subset_derives_sentence() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1), (0, 2), (0, 3)], 2));
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));

        let deductions = kb.subset_eliminations().unwrap();
        assert_eq!(
            deductions,
            vec![Deduction::Derived(sentence(&[(0, 2), (0, 3)], 1))]
        );
    }

    #[test]
    fn test_unrelated_sentences_prove_nothing() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));
        kb.insert(sentence(&[(0, 1), (0, 2)], 1));
        assert!(kb.subset_eliminations().unwrap().is_empty());
    }

    #[test]
    fn test_negative_derivation_is_rejected() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));
        kb.insert(sentence(&[(0, 0), (0, 1), (0, 2)], 0));

        let err = kb.subset_eliminations().unwrap_err();
        assert!(matches!(err, KnowledgeError::InconsistentSentences { .. }));
    }

    #[test]
    fn test_same_cells_different_counts_is_rejected() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));
        kb.insert(sentence(&[(0, 0), (0, 1)], 2));
        assert!(kb.subset_eliminations().is_err());
    }

    #[test]
    fn test_dedup_after_marking() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1), (0, 2)], 1));
        kb.insert(sentence(&[(0, 0), (0, 1), (1, 2)], 1));
        assert!(!kb.dedup());

        kb.mark_safe(Cell::new(0, 2)).unwrap();
        kb.mark_safe(Cell::new(1, 2)).unwrap();
        assert!(kb.dedup());
        assert_eq!(kb.len(), 1);
        assert!(kb.contains(&sentence(&[(0, 0), (0, 1)], 1)));
    }

    #[test]
    fn test_take_resolved() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 2));
        kb.insert(sentence(&[(1, 0), (1, 1)], 0));
        kb.insert(sentence(&[(2, 0), (2, 1)], 1));

        let resolved = kb.take_resolved();
        assert_eq!(resolved.len(), 2);
        assert_eq!(kb.len(), 1);
        assert!(kb.contains(&sentence(&[(2, 0), (2, 1)], 1)));
    }

    #[test]
    fn test_forbids() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 0));
        kb.insert(sentence(&[(1, 0)], 1));

        assert!(kb.forbids_mine(Cell::new(0, 0)));
        assert!(!kb.forbids_safe(Cell::new(0, 0)));
        assert!(kb.forbids_safe(Cell::new(1, 0)));
        assert!(!kb.forbids_mine(Cell::new(1, 0)));
        assert!(!kb.forbids_mine(Cell::new(2, 2)));
    }

    #[test]
    fn test_forbidden_marks_leave_every_sentence_alone() {
        let mut kb = KnowledgeBase::new();
        kb.insert(sentence(&[(0, 0), (0, 1)], 1));
        kb.insert(sentence(&[(0, 1), (0, 2)], 0));
        let before = kb.clone();

        // The first sentence could take the mine, the second cannot.
        assert_eq!(
            kb.mark_mine(Cell::new(0, 1)),
            Err(KnowledgeError::Contradiction {
                cell: Cell::new(0, 1)
            })
        );
        assert_eq!(kb, before);

        kb.mark_mine(Cell::new(0, 0)).unwrap();
        assert!(kb.contains(&sentence(&[(0, 1)], 0)));
    }
}
