use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Board, Bounds, Cell, Minesweeper, MinesweeperAi};

/// Represents the current state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// How the player picked a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The cell was deduced to be safe.
    Safe,
    /// Nothing could be deduced, so the cell was a guess.
    Random,
}

/// What revealing a cell showed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Revealed(u8),
    Exploded,
}

/// A move taken by [`Game::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
    pub outcome: Outcome,
}

/// A board together with the player deducing its mines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    board: Minesweeper,
    ai: MinesweeperAi,
    /// Counts of the cells revealed so far.
    revealed: HashMap<Cell, u8>,
    exploded: Option<Cell>,
    state: GameState,
}

impl Game {
    pub fn new(board: Minesweeper) -> Self {
        let ai = MinesweeperAi::new(board.bounds());
        Self {
            board,
            ai,
            revealed: HashMap::new(),
            exploded: None,
            state: GameState::Playing,
        }
    }

    /// Deserializes a game state from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        Ok(bcs::from_bytes(bts)?)
    }

    /// Serializes the game state to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    pub fn bounds(&self) -> Bounds {
        self.board.bounds()
    }

    pub fn board(&self) -> &Minesweeper {
        &self.board
    }

    pub fn ai(&self) -> &MinesweeperAi {
        &self.ai
    }

    pub fn revealed(&self) -> &HashMap<Cell, u8> {
        &self.revealed
    }

    pub fn exploded(&self) -> Option<Cell> {
        self.exploded
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Reveals `cell` and lets the player learn from it.
    pub fn reveal(&mut self, cell: Cell) -> anyhow::Result<Outcome> {
        if self.state != GameState::Playing {
            anyhow::bail!("game_ended");
        }
        anyhow::ensure!(self.bounds().contains(cell), "cell {cell} is off the board");
        anyhow::ensure!(
            !self.revealed.contains_key(&cell),
            "cell {cell} is already revealed"
        );

        if self.board.is_mine(cell) {
            log::info!("hit a mine at {cell}");
            self.exploded = Some(cell);
            self.state = GameState::Lost;
            return Ok(Outcome::Exploded);
        }

        let count = self.board.nearby_mines(cell);
        self.revealed.insert(cell, count);
        self.ai.add_knowledge(cell, count)?;

        if self.check_win_condition() {
            log::info!("all {} mines located", self.board.mines().len());
            self.state = GameState::Won;
        }
        Ok(Outcome::Revealed(count))
    }

    /// Makes the player's next move: a cell known to be safe if there is one,
    /// a random guess otherwise.
    ///
    /// Returns `None` when no cell is left to reveal.
    pub fn step<R>(&mut self, rng: &mut R) -> anyhow::Result<Option<Move>>
    where
        R: Rng + ?Sized,
    {
        if self.state != GameState::Playing {
            anyhow::bail!("game_ended");
        }

        let (cell, kind) = if let Some(cell) = self.ai.make_safe_move() {
            (cell, MoveKind::Safe)
        } else if let Some(cell) = self.ai.make_random_move(rng) {
            (cell, MoveKind::Random)
        } else {
            return Ok(None);
        };

        let outcome = self.reveal(cell)?;
        log::info!("{kind:?} move at {cell}: {outcome:?}");
        Ok(Some(Move {
            cell,
            kind,
            outcome,
        }))
    }

    /// Whether every cell without a mine has been revealed, or the player has
    /// identified exactly the board's mines.
    ///
    /// A board without mines is therefore won by its first reveal, even with
    /// cells still hidden.
    pub fn check_win_condition(&self) -> bool {
        self.revealed.len() + self.board.mines().len() == self.bounds().area()
            || self.board.won(self.ai.mines())
    }
}
