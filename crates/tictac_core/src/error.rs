//! Error types for game operations.

use serde::{Deserialize, Serialize};

/// Why a move was rejected by the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum InvalidMoveReason {
    /// The position is outside 0-8.
    #[display("position out of bounds (must be 0-8)")]
    OutOfRange,

    /// The cell already holds a mark.
    #[display("cell is already occupied")]
    Occupied,

    /// The board already has a winner or is full.
    #[display("game is already over")]
    GameOver,
}

/// Error that can occur when playing or selecting a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The board refused the move.
    #[display("Invalid move at {}: {}", position, reason)]
    InvalidMove {
        /// The requested position.
        position: usize,
        /// Why it was refused.
        reason: InvalidMoveReason,
    },

    /// The game has ended; only restart or a mode change is allowed.
    #[display("Game is already over")]
    GameAlreadyOver,

    /// Automated selection was requested on a board with no empty cell.
    #[display("No moves available")]
    NoMovesAvailable,
}

impl std::error::Error for GameError {}
