//! Named board positions.

use crate::types::Board;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// Get label for this position (for display).
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates position from board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Position::iter().nth(index)
    }

    /// Parses player input: the 1-based number shown on the board, or a label.
    ///
    /// Labels match case-insensitively, so `center`, `top-left` and
    /// `bottom right` all resolve. A fragment of three or more characters
    /// is accepted only when it fits a single label.
    #[instrument]
    pub fn from_input(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return num.checked_sub(1).and_then(Self::from_index);
        }
        if s.is_empty() {
            return None;
        }

        let wanted = s.to_lowercase().replace([' ', '_'], "-");
        let exact = Position::iter().find(|pos| pos.label().to_lowercase() == wanted);
        exact.or_else(|| {
            if wanted.len() < 3 {
                return None;
            }
            let mut partial =
                Position::iter().filter(|pos| pos.label().to_lowercase().contains(&wanted));
            match (partial.next(), partial.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        })
    }

    /// Filters positions by board state - returns only empty cells.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Position::iter()
            .filter(|pos| board.is_empty(pos.to_index()))
            .collect()
    }
}

impl From<Position> for usize {
    fn from(pos: Position) -> usize {
        pos.to_index()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_position_index_roundtrip_edges() {
        assert_eq!(Position::TopLeft.to_index(), 0);
        assert_eq!(Position::Center.to_index(), 4);
        assert_eq!(Position::from_index(8), Some(Position::BottomRight));
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_from_input_numbers_are_one_based() {
        assert_eq!(Position::from_input("1"), Some(Position::TopLeft));
        assert_eq!(Position::from_input(" 9 "), Some(Position::BottomRight));
        assert_eq!(Position::from_input("0"), None);
        assert_eq!(Position::from_input("10"), None);
    }

    #[test]
    fn test_from_input_labels() {
        assert_eq!(Position::from_input("center"), Some(Position::Center));
        assert_eq!(Position::from_input("Top Left"), Some(Position::TopLeft));
        assert_eq!(Position::from_input("bottom_right"), Some(Position::BottomRight));
        assert_eq!(Position::from_input("nowhere"), None);
        assert_eq!(Position::from_input(""), None);
    }

    #[test]
    fn test_from_input_rejects_ambiguous_fragments() {
        assert_eq!(Position::from_input("cent"), None);
        assert_eq!(Position::from_input("left"), None);
        assert_eq!(Position::from_input("top"), None);
        assert_eq!(Position::from_input("bottom-c"), Some(Position::BottomCenter));
        assert_eq!(Position::from_input("middle r"), Some(Position::MiddleRight));
    }

    #[test]
    fn test_from_index_follows_declaration_order() {
        for (index, pos) in Position::iter().enumerate() {
            assert_eq!(Position::from_index(index), Some(pos));
            assert_eq!(pos.to_index(), index);
        }
    }

    #[test]
    fn test_valid_moves_filters_occupied() {
        let mut board = Board::new();
        board.apply(0, Player::X).unwrap();
        board.apply(4, Player::O).unwrap();

        let valid = Position::valid_moves(&board);
        assert_eq!(valid.len(), 7);
        assert!(!valid.contains(&Position::TopLeft));
        assert!(!valid.contains(&Position::Center));
        assert!(valid.contains(&Position::BottomRight));
    }
}
