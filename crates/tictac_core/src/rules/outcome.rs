//! Terminal detection: the derived outcome of a board.

use super::{check_winner, is_full};
use crate::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of a board, recomputed after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum GameOutcome {
    /// No line is complete and at least one cell is empty.
    #[display("In progress")]
    InProgress,
    /// The player holds a complete line.
    #[display("Player {_0} wins")]
    Win(Player),
    /// All cells are occupied and nobody holds a line.
    #[display("Draw")]
    Draw,
}

impl GameOutcome {
    /// Returns true for `Win` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            _ => None,
        }
    }
}

/// Evaluates the board: a win beats a full board, a full board is a draw.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::Win(winner)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}
