//! Game sessions: the contract a front end drives.
//!
//! A session owns one board, whose turn it is, the mode, and the move
//! history of the current game. Every call completes its whole turn
//! (including the automated reply in Automated mode) before returning.

use crate::action::Move;
use crate::engine::{Heuristic, Strategy};
use crate::error::GameError;
use crate::rules::{self, GameOutcome};
use crate::types::{Board, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who controls the second player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mode {
    /// Two people share the board.
    Manual,
    /// O is played by the session's strategy.
    #[default]
    Automated,
}

/// The side the strategy plays in Automated mode.
pub const AUTOMATED_SIDE: Player = Player::O;

/// What a call to [`GameSession::play_at`] or [`GameSession::auto_move`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayReport {
    /// Moves applied by this call, in order.
    moves: Vec<Move>,
    /// Outcome after the last move.
    outcome: GameOutcome,
    /// Board snapshot after the last move.
    board: Board,
    /// Player to move next (the last mover once the game is over).
    turn: Player,
}

/// One game of tic-tac-toe and the settings it is played under.
#[derive(Debug)]
pub struct GameSession {
    mode: Mode,
    board: Board,
    turn: Player,
    history: Vec<Move>,
    strategy: Box<dyn Strategy>,
}

impl GameSession {
    /// Creates a session with the heuristic opponent.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        Self::with_strategy(mode, Heuristic::default())
    }

    /// Creates a session with a specific opponent.
    #[instrument(skip(strategy), fields(strategy = strategy.name()))]
    pub fn with_strategy(mode: Mode, strategy: impl Strategy + 'static) -> Self {
        info!(%mode, "Creating game session");
        Self {
            mode,
            board: Board::new(),
            turn: Player::X,
            history: Vec::new(),
            strategy: Box::new(strategy),
        }
    }

    /// Starts a fresh game in `mode`.
    pub fn new_game(&mut self, mode: Mode) {
        self.set_mode(mode);
    }

    /// Switches mode. Always resets the board, turn and history.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.restart();
    }

    /// Clears the board and hands the first move back to X.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(mode = %self.mode, "Restarting game");
        self.board.reset();
        self.turn = Player::X;
        self.history.clear();
    }

    /// Places the current player's mark at `position` (0-8).
    ///
    /// In Automated mode, if the game goes on and the automated side is to
    /// move, its reply is applied too and included in the report.
    ///
    /// # Errors
    ///
    /// [`GameError::GameAlreadyOver`] once the game has an outcome;
    /// [`GameError::InvalidMove`] for out-of-range or occupied cells; any
    /// error from the strategy's reply. The session is unchanged on error,
    /// including the human's move when the reply fails.
    #[instrument(skip(self), fields(turn = %self.turn, mode = %self.mode))]
    pub fn play_at(&mut self, position: usize) -> Result<PlayReport, GameError> {
        self.ensure_in_progress()?;

        self.all_or_nothing(|session| {
            let mut moves = vec![Move::manual(session.turn, position)];
            session.place(moves[0])?;
            session.reply_if_automated(&mut moves)?;
            Ok(moves)
        })
    }

    /// Lets the strategy play the current turn, whoever is to move.
    ///
    /// In Automated mode, a move chosen for X is followed by the usual reply
    /// for O, so control always comes back to the human side.
    ///
    /// # Errors
    ///
    /// [`GameError::GameAlreadyOver`] once the game has an outcome, or
    /// whatever the strategy reports. The session is unchanged on error.
    #[instrument(skip(self), fields(turn = %self.turn, mode = %self.mode))]
    pub fn auto_move(&mut self) -> Result<PlayReport, GameError> {
        self.ensure_in_progress()?;

        self.all_or_nothing(|session| {
            let mut moves = vec![session.engine_move()?];
            session.reply_if_automated(&mut moves)?;
            Ok(moves)
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Returns the mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the moves of the current game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        rules::evaluate(&self.board)
    }

    /// Returns the display name of a player under the current mode.
    pub fn player_name(&self, player: Player) -> &'static str {
        match (self.mode, player) {
            (Mode::Automated, Player::X) => "User",
            (Mode::Automated, Player::O) => "AI",
            (Mode::Manual, Player::X) => "User 1",
            (Mode::Manual, Player::O) => "User 2",
        }
    }

    /// Returns the end-of-game message, or `None` while the game goes on.
    pub fn status_message(&self) -> Option<String> {
        match self.outcome() {
            GameOutcome::InProgress => None,
            GameOutcome::Win(player) => Some(format!("{} has won!", self.player_name(player))),
            GameOutcome::Draw => Some("Draw!".to_string()),
        }
    }

    /// Runs one turn; on error puts board, turn and history back as they were.
    fn all_or_nothing(
        &mut self,
        turn: impl FnOnce(&mut Self) -> Result<Vec<Move>, GameError>,
    ) -> Result<PlayReport, GameError> {
        let (board, to_move, history_len) = (self.board, self.turn, self.history.len());
        match turn(self) {
            Ok(moves) => Ok(self.report(moves)),
            Err(e) => {
                warn!(error = %e, "Turn failed; rolling back");
                self.board = board;
                self.turn = to_move;
                self.history.truncate(history_len);
                Err(e)
            }
        }
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        let outcome = self.outcome();
        if outcome.is_terminal() {
            warn!(%outcome, "Action attempted after game end");
            return Err(GameError::GameAlreadyOver);
        }
        Ok(())
    }

    /// Applies a move and advances the turn unless the game just ended.
    fn place(&mut self, mv: Move) -> Result<(), GameError> {
        self.board.apply(mv.position, mv.player)?;
        self.history.push(mv);

        let outcome = self.outcome();
        if !outcome.is_terminal() {
            self.turn = mv.player.opponent();
        }
        debug!(%mv, %outcome, "Move applied");
        Ok(())
    }

    /// Asks the strategy for the current player's move and applies it as that player.
    fn engine_move(&mut self) -> Result<Move, GameError> {
        let acting = self.turn;
        let selection = self.strategy.choose(&self.board, acting)?;
        let mv = Move::automated(acting, *selection.position(), *selection.tier());
        self.place(mv)?;
        Ok(mv)
    }

    fn reply_if_automated(&mut self, moves: &mut Vec<Move>) -> Result<(), GameError> {
        if self.mode == Mode::Automated
            && self.turn == AUTOMATED_SIDE
            && !self.outcome().is_terminal()
        {
            moves.push(self.engine_move()?);
        }
        Ok(())
    }

    fn report(&self, moves: Vec<Move>) -> PlayReport {
        PlayReport {
            moves,
            outcome: self.outcome(),
            board: self.board,
            turn: self.turn,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FirstAvailable, Selection};

    /// Opponent that never finds a move.
    #[derive(Debug)]
    struct Stuck;

    impl Strategy for Stuck {
        fn choose(&mut self, _board: &Board, _acting: Player) -> Result<Selection, GameError> {
            Err(GameError::NoMovesAvailable)
        }

        fn name(&self) -> &str {
            "stuck"
        }
    }

    #[test]
    fn test_failed_reply_rolls_back_human_move() {
        let mut session = GameSession::with_strategy(Mode::Automated, Stuck);

        assert_eq!(session.play_at(4), Err(GameError::NoMovesAvailable));
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.turn(), Player::X);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_failed_auto_move_leaves_session_unchanged() {
        let mut session = GameSession::with_strategy(Mode::Manual, Stuck);
        session.play_at(0).unwrap();
        let board = *session.board();

        assert_eq!(session.auto_move(), Err(GameError::NoMovesAvailable));
        assert_eq!(session.board(), &board);
        assert_eq!(session.turn(), Player::O);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_player_names_follow_mode() {
        let mut session = GameSession::with_strategy(Mode::Automated, FirstAvailable);
        assert_eq!(session.player_name(Player::X), "User");
        assert_eq!(session.player_name(Player::O), "AI");
        session.set_mode(Mode::Manual);
        assert_eq!(session.player_name(Player::X), "User 1");
        assert_eq!(session.player_name(Player::O), "User 2");
    }

    #[test]
    fn test_failed_move_leaves_session_unchanged() {
        let mut session = GameSession::with_strategy(Mode::Manual, FirstAvailable);
        session.play_at(0).unwrap();
        let board = *session.board();

        assert!(session.play_at(0).is_err());
        assert!(session.play_at(42).is_err());
        assert_eq!(session.board(), &board);
        assert_eq!(session.turn(), Player::O);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("manual".parse::<Mode>().unwrap(), Mode::Manual);
        assert_eq!("Automated".parse::<Mode>().unwrap(), Mode::Automated);
        assert!("robot".parse::<Mode>().is_err());
        assert_eq!(Mode::Manual.to_string(), "manual");
    }
}
