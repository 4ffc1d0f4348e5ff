//! Win detection logic for tic-tac-toe.

use crate::types::{Board, Cell, Player};
use tracing::{instrument, warn};

/// The 8 winning lines as board indices.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Reports which players hold at least one complete line, as `(x, o)`.
pub fn line_holders(board: &Board) -> (bool, bool) {
    let cells = board.cells();
    let holds = |player: Player| {
        LINES
            .iter()
            .any(|line| line.iter().all(|&i| cells[i] == Cell::Occupied(player)))
    };
    (holds(Player::X), holds(Player::O))
}

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player has three in a row, `None` otherwise.
///
/// Boards built through [`Board::apply`] can never show two winners, since
/// no move is accepted once a line is complete. Hand-built boards can; in
/// that case the player who moved last wins, inferred from mark counts
/// (X has one more mark than O right after X moves).
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Player> {
    match line_holders(board) {
        (true, false) => Some(Player::X),
        (false, true) => Some(Player::O),
        (false, false) => None,
        (true, true) => {
            let last_mover = if board.count(Player::X) > board.count(Player::O) {
                Player::X
            } else {
                Player::O
            };
            warn!(?last_mover, "Both players hold a line; crediting last mover");
            Some(last_mover)
        }
    }
}
