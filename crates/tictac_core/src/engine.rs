//! Automated move selection.
//!
//! The heuristic looks one ply ahead in three tiers, in strict priority:
//!
//! 1. [`Tier::WinNow`] - the first empty cell (index order) that completes
//!    a line for the acting player.
//! 2. [`Tier::Block`] - the first empty cell that would complete a line for
//!    the opponent.
//! 3. [`Tier::Random`] - a uniform pick among the empty cells.
//!
//! Lookahead checks take the hypothetical player as an argument and run
//! against a copy of the board, so the search never writes to the caller's
//! board or touches whose turn it is. The returned position is always meant for the
//! acting player's mark, whichever tier found it.

use crate::error::GameError;
use crate::rules::{self, GameOutcome};
use crate::types::{Board, Player};
use derive_getters::Getters;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Priority level of the heuristic that produced a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Tier {
    /// Completes a line for the acting player.
    #[strum(to_string = "win-now")]
    WinNow,
    /// Occupies the cell the opponent needs to complete a line.
    #[strum(to_string = "block")]
    Block,
    /// Uniform choice among empty cells.
    #[strum(to_string = "random")]
    Random,
    /// Picked by a strategy that does not rank moves.
    #[strum(to_string = "first-available")]
    FirstAvailable,
}

/// A chosen position and the tier that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Selection {
    /// Board index (0-8) to play.
    position: usize,
    /// Tier that produced the position.
    tier: Tier,
}

/// Returns true if placing `player` at `position` completes a line for `player`.
///
/// Out-of-range and occupied cells never win. The board itself is not
/// modified.
pub fn wins_with(board: &Board, position: usize, player: Player) -> bool {
    if !board.is_empty(position) {
        return false;
    }
    let after = board.with_mark(position, player);
    rules::evaluate(&after) == GameOutcome::Win(player)
}

/// First empty cell, in index order, where `player` would complete a line.
fn first_winning_cell(board: &Board, player: Player) -> Option<usize> {
    board
        .empty_positions()
        .find(|&pos| wins_with(board, pos, player))
}

/// Fails unless the board still accepts moves.
fn ensure_playable(board: &Board) -> Result<(), GameError> {
    if rules::evaluate(board).is_terminal() {
        return Err(GameError::GameAlreadyOver);
    }
    if board.empty_positions().next().is_none() {
        return Err(GameError::NoMovesAvailable);
    }
    Ok(())
}

/// Selects a move for `acting` with the three-tier heuristic.
///
/// # Errors
///
/// [`GameError::GameAlreadyOver`] if the board already has an outcome,
/// [`GameError::NoMovesAvailable`] if no cell is empty.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move<R: Rng + ?Sized>(
    board: &Board,
    acting: Player,
    rng: &mut R,
) -> Result<Selection, GameError> {
    ensure_playable(board)?;

    if let Some(pos) = first_winning_cell(board, acting) {
        debug!(position = pos, "Winning move found");
        return Ok(Selection::new(pos, Tier::WinNow));
    }

    if let Some(pos) = first_winning_cell(board, acting.opponent()) {
        debug!(position = pos, "Blocking opponent");
        return Ok(Selection::new(pos, Tier::Block));
    }

    let pos = board
        .empty_positions()
        .choose(rng)
        .ok_or(GameError::NoMovesAvailable)?;
    debug!(position = pos, "No forced move; picked at random");
    Ok(Selection::new(pos, Tier::Random))
}

/// Something that picks moves for the automated side.
pub trait Strategy: std::fmt::Debug + Send {
    /// Chooses a position for `acting` on `board`.
    ///
    /// Implementations must not assume the board is theirs to change; they
    /// only receive a shared reference.
    fn choose(&mut self, board: &Board, acting: Player) -> Result<Selection, GameError>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// The three-tier heuristic opponent.
#[derive(Debug, Clone)]
pub struct Heuristic<R = StdRng> {
    rng: R,
}

impl Heuristic<StdRng> {
    /// Creates a heuristic seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a heuristic with a fixed seed, for reproducible games.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Heuristic<R> {
    /// Creates a heuristic drawing from the given generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for Heuristic<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng + std::fmt::Debug + Send> Strategy for Heuristic<R> {
    fn choose(&mut self, board: &Board, acting: Player) -> Result<Selection, GameError> {
        select_move(board, acting, &mut self.rng)
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Deterministic opponent that takes the first empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl Strategy for FirstAvailable {
    #[instrument(skip(self, board))]
    fn choose(&mut self, board: &Board, acting: Player) -> Result<Selection, GameError> {
        ensure_playable(board)?;
        let pos = board
            .empty_positions()
            .next()
            .ok_or(GameError::NoMovesAvailable)?;
        debug!(position = pos, "Took first available cell");
        Ok(Selection::new(pos, Tier::FirstAvailable))
    }

    fn name(&self) -> &str {
        "first-available"
    }
}
