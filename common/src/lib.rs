//! A minesweeper player that reasons about the board with logical sentences.
//!
//! Every revealed cell yields a [`Sentence`] stating how many of its hidden
//! neighbors are mines. [`MinesweeperAi`] keeps these sentences in a
//! [`KnowledgeBase`], compares them pairwise by subset elimination until
//! nothing new follows, and offers a cell known to be safe as its next move,
//! falling back to a random guess.

mod ai;
mod board;
mod cell;
mod error;
mod game;
mod knowledge;
mod sentence;
#[cfg(test)]
mod testing;

pub use ai::MinesweeperAi;
pub use board::{Board, Minesweeper};
pub use cell::{Bounds, Cell};
pub use error::{BoardError, KnowledgeError};
pub use game::{Game, GameState, Move, MoveKind, Outcome};
pub use knowledge::{Deduction, KnowledgeBase};
pub use sentence::Sentence;
