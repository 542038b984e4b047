use crate::{Bounds, Cell, Sentence};

/// Reasons the inference engine rejects an observation or a deduction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum KnowledgeError {
    #[display("cell {cell} is outside the {bounds} board")]
    OutOfBounds { cell: Cell, bounds: Bounds },
    #[display("cell {cell} has already been revealed")]
    AlreadyRevealed { cell: Cell },
    #[display("cell {cell} is a known mine and cannot be revealed")]
    KnownMine { cell: Cell },
    #[display("count {count} at {cell} does not fit the known neighbors")]
    InconsistentCount { cell: Cell, count: u8 },
    #[display("cell {cell} is deduced to be both safe and a mine")]
    Contradiction { cell: Cell },
    #[display("{count} mines do not fit among {cells} cells")]
    OverfullSentence { count: usize, cells: usize },
    #[display("{sentence} cannot hold for the known safes and mines")]
    Unsatisfiable { sentence: Sentence },
    #[display("{subset} cannot be a subset of {superset}")]
    InconsistentSentences { subset: Sentence, superset: Sentence },
}

/// Reasons a board cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    #[display("{mines} mines do not fit on {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[display("mine {cell} is outside the {bounds} board")]
    MineOutOfBounds { cell: Cell, bounds: Bounds },
}
