//! First-class move records.
//!
//! A move is a domain event: who placed a mark where, and whether the
//! engine picked it. Sessions keep them as the history of the current game.

use crate::engine::Tier;
use crate::position::Position;
use crate::types::Player;
use serde::{Deserialize, Serialize};

/// A mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player who placed the mark.
    pub player: Player,
    /// Board index (0-8).
    pub position: usize,
    /// Set when the automated opponent chose this move.
    pub tier: Option<Tier>,
}

impl Move {
    /// A move typed in by a person.
    pub fn manual(player: Player, position: usize) -> Self {
        Self {
            player,
            position,
            tier: None,
        }
    }

    /// A move chosen by a strategy.
    pub fn automated(player: Player, position: usize, tier: Tier) -> Self {
        Self {
            player,
            position,
            tier: Some(tier),
        }
    }

    /// Returns true if a strategy chose this move.
    pub fn is_automated(&self) -> bool {
        self.tier.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = Position::from_index(self.position)
            .map(Position::label)
            .unwrap_or("?");
        write!(f, "{} -> {}", self.player, label)?;
        if let Some(tier) = self.tier {
            write!(f, " ({})", tier)?;
        }
        Ok(())
    }
}
