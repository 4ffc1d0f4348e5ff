//! tictac_core - tic-tac-toe game logic with a rule-based opponent.
//!
//! # Architecture
//!
//! - **Board state**: [`Board`], [`Cell`], [`Player`], [`Position`]. The
//!   board is the only place a cell is written, through [`Board::apply`].
//! - **Rules**: [`evaluate`] derives a [`GameOutcome`] from a board.
//! - **Engine**: [`select_move`] picks a move for the automated side
//!   (win now, else block, else random) behind the [`Strategy`] trait.
//! - **Session**: [`GameSession`] is what a front end drives:
//!   `play_at`, `auto_move`, `restart`, `set_mode`.
//!
//! # Example
//!
//! ```
//! use tictac_core::{GameOutcome, GameSession, Mode, Player};
//!
//! let mut session = GameSession::new(Mode::Automated);
//! let report = session.play_at(4)?;
//!
//! // The human's move and the engine's reply come back together.
//! assert_eq!(report.moves().len(), 2);
//! assert_eq!(*report.outcome(), GameOutcome::InProgress);
//! assert_eq!(session.turn(), Player::X);
//! # Ok::<(), tictac_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod error;
mod position;
mod session;
mod types;

pub mod rules;

pub use action::Move;
pub use engine::{FirstAvailable, Heuristic, Selection, Strategy, Tier, select_move, wins_with};
pub use error::{GameError, InvalidMoveReason};
pub use position::Position;
pub use rules::{GameOutcome, evaluate};
pub use session::{AUTOMATED_SIDE, GameSession, Mode, PlayReport};
pub use types::{Board, CELL_COUNT, Cell, ParseBoardError, Player};
