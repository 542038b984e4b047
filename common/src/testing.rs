//! A SAT-backed reference for checking the inference engine's conclusions.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver, Var};

use crate::{Bounds, Cell, Sentence};

/// The cells whose status is the same in every mine layout that satisfies a
/// set of sentences.
#[derive(Debug, Default)]
pub struct ForcedCells {
    pub mines: HashSet<Cell>,
    pub safes: HashSet<Cell>,
}

impl ForcedCells {
    /// Tests every cell of `bounds` both ways against `sentences`.
    pub fn solve(bounds: Bounds, sentences: &[Sentence]) -> Self {
        let mut solver = Solver::new();
        let vars: HashMap<Cell, Var> = bounds
            .cells()
            .map(|cell| (cell, solver.new_var()))
            .collect();

        let mut formula = CnfFormula::new();
        for sentence in sentences {
            let lits: Vec<Lit> = sentence
                .cells()
                .iter()
                .sorted()
                .map(|cell| Lit::from_var(vars[cell], true))
                .collect();
            encode_exactly_k(&mut formula, &lits, sentence.count());
        }
        solver.add_formula(&formula);
        assert!(
            solver.solve().unwrap_or(false),
            "sentences admit no mine layout"
        );

        let mut forced = ForcedCells::default();
        for (&cell, &var) in &vars {
            let mine_possible = satisfiable_with(&mut solver, Lit::from_var(var, true));
            let safe_possible = satisfiable_with(&mut solver, Lit::from_var(var, false));
            match (mine_possible, safe_possible) {
                (true, false) => {
                    forced.mines.insert(cell);
                }
                (false, true) => {
                    forced.safes.insert(cell);
                }
                (true, true) => {}
                (false, false) => unreachable!("{cell} can be neither safe nor a mine"),
            }
        }
        forced
    }
}

/// The sentences a board's reveals directly state: each revealed cell is safe,
/// and its count covers all of its neighbors.
pub fn observations(bounds: Bounds, revealed: &HashMap<Cell, u8>) -> Vec<Sentence> {
    revealed
        .iter()
        .flat_map(|(&cell, &count)| {
            [
                Sentence::new([cell], 0).unwrap(),
                Sentence::new(bounds.neighbors(cell), usize::from(count)).unwrap(),
            ]
        })
        .collect()
}

fn satisfiable_with(solver: &mut Solver<'_>, lit: Lit) -> bool {
    solver.assume(&[lit]);
    let result = solver.solve().unwrap_or(false);
    solver.assume(&[]);
    result
}

fn encode_exactly_k(formula: &mut CnfFormula, lits: &[Lit], k: usize) {
    // At most k: any k + 1 of them include a safe cell.
    if k < lits.len() {
        for combo in lits.iter().copied().combinations(k + 1) {
            let clause: Vec<Lit> = combo.iter().map(|&lit| !lit).collect();
            formula.add_clause(&clause);
        }
    }

    // At least k: any n - k + 1 of them include a mine.
    if k > lits.len() {
        formula.add_clause(&[]);
    } else if k > 0 {
        for combo in lits.iter().copied().combinations(lits.len() - k + 1) {
            formula.add_clause(&combo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_pair_is_undetermined() {
        let bounds = Bounds::new(1, 2);
        let forced = ForcedCells::solve(
            bounds,
            &[Sentence::new([Cell::new(0, 0), Cell::new(0, 1)], 1).unwrap()],
        );
        assert!(forced.mines.is_empty());
        assert!(forced.safes.is_empty());
    }

    #[test]
    fn test_overlap_forces_cells() {
        let bounds = Bounds::new(1, 3);
        let forced = ForcedCells::solve(
            bounds,
            &[
                Sentence::new([Cell::new(0, 0), Cell::new(0, 1)], 1).unwrap(),
                Sentence::new([Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)], 2).unwrap(),
            ],
        );
        assert_eq!(forced.mines, HashSet::from([Cell::new(0, 2)]));
        assert!(forced.safes.is_empty());
    }
}
