//! Core domain types for tic-tac-toe.

use crate::error::{GameError, InvalidMoveReason};
use crate::rules::{self, GameOutcome};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{instrument, warn};

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, the automated side in Automated mode).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a player's mark.
    Occupied(Player),
}

impl Cell {
    /// Returns the player holding this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// 3x3 tic-tac-toe board.
///
/// Cells are only ever written through [`Board::apply`], which keeps the
/// mutation all-or-nothing, and cleared through [`Board::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Places `player`'s mark at `position`.
    ///
    /// Does not flip any turn and does not report the outcome; callers
    /// evaluate the board afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidMove`] if the position is out of range,
    /// the cell is occupied, or the board already holds a terminal outcome.
    /// The board is left untouched on error.
    #[instrument(skip(self))]
    pub fn apply(&mut self, position: usize, player: Player) -> Result<(), GameError> {
        let reason = if position >= CELL_COUNT {
            Some(InvalidMoveReason::OutOfRange)
        } else if rules::evaluate(self).is_terminal() {
            Some(InvalidMoveReason::GameOver)
        } else if !self.is_empty(position) {
            Some(InvalidMoveReason::Occupied)
        } else {
            None
        };

        if let Some(reason) = reason {
            warn!(position, ?player, %reason, "Rejected move");
            return Err(GameError::InvalidMove { position, reason });
        }

        self.cells[position] = Cell::Occupied(player);
        Ok(())
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Gets the cell at the given position (0-8).
    pub fn get(&self, position: usize) -> Option<Cell> {
        self.cells.get(position).copied()
    }

    /// Checks if a position holds an empty cell. Out-of-range positions are never empty.
    pub fn is_empty(&self, position: usize) -> bool {
        matches!(self.get(position), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Iterates empty positions in index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CELL_COUNT).filter(|&pos| self.is_empty(pos))
    }

    /// Counts the marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Cell::Occupied(player))
            .count()
    }

    /// Checks if the board is full (all cells occupied).
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Returns the same board with one extra mark, without any validation.
    ///
    /// Used by lookahead checks; the receiver is not modified.
    pub(crate) fn with_mark(mut self, position: usize, player: Player) -> Self {
        self.cells[position] = Cell::Occupied(player);
        self
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.cells[pos] {
                    Cell::Empty => (pos + 1).to_string(),
                    Cell::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Returns the outcome of this board.
    pub fn outcome(&self) -> GameOutcome {
        rules::evaluate(self)
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// A character that is not a mark, an empty marker or a separator.
    #[display("Unexpected character {:?} in board", _0)]
    UnexpectedChar(char),

    /// The text did not describe exactly nine cells.
    #[display("Board needs 9 cells, found {}", _0)]
    WrongLength(usize),
}

impl std::error::Error for ParseBoardError {}

impl FromStr for Board {
    type Err = ParseBoardError;

    /// Parses nine cells: `X`/`O` for marks, `.`, `_` or `-` for empty.
    /// Whitespace and `|` are ignored. No alternation check is made.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(CELL_COUNT);
        for c in s.chars() {
            let cell = match c {
                'x' | 'X' => Cell::Occupied(Player::X),
                'o' | 'O' => Cell::Occupied(Player::O),
                '.' | '_' | '-' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                other => return Err(ParseBoardError::UnexpectedChar(other)),
            };
            cells.push(cell);
        }

        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_only_target_cell() {
        let mut board = Board::new();
        board.apply(4, Player::X).unwrap();
        assert_eq!(board.get(4), Some(Cell::Occupied(Player::X)));
        assert_eq!(board.empty_positions().count(), 8);
    }

    #[test]
    fn test_apply_out_of_range_rejected() {
        let mut board = Board::new();
        let err = board.apply(9, Player::X).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove {
                position: 9,
                reason: InvalidMoveReason::OutOfRange
            }
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_occupied_rejected() {
        let mut board = Board::new();
        board.apply(0, Player::X).unwrap();
        let before = board;
        let err = board.apply(0, Player::O).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove {
                reason: InvalidMoveReason::Occupied,
                ..
            }
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_apply_after_win_rejected() {
        let mut board: Board = "XXX OO. ...".parse().unwrap();
        let before = board;
        let err = board.apply(5, Player::O).unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidMove {
                reason: InvalidMoveReason::GameOver,
                ..
            }
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn test_reset_clears_board() {
        let mut board: Board = "XO. .X. ..O".parse().unwrap();
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board: Board = "X.. .O. ...".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(ParseBoardError::UnexpectedChar('?'))
        );
        assert_eq!(
            "XO".parse::<Board>(),
            Err(ParseBoardError::WrongLength(2))
        );
    }

    #[test]
    fn test_count_marks() {
        let board: Board = "XOX|.O.|X..".parse().unwrap();
        assert_eq!(board.count(Player::X), 3);
        assert_eq!(board.count(Player::O), 2);
    }
}
