//! Game rules for tic-tac-toe.
//!
//! Pure functions that evaluate a board. Rules are kept apart from board
//! storage so the board only guards its cells and the engine only decides.

pub mod draw;
pub mod outcome;
pub mod win;

pub use draw::is_full;
pub use outcome::{GameOutcome, evaluate};
pub use win::{LINES, check_winner, line_holders};
