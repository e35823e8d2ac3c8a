//! # Game Controller Module - Authoritative Match State
//!
//! The `GameController` owns the "real" state of a match. The engine only
//! ever searches duplicates of it, and the driver only ever renders it.
//! Every move goes through the controller, which records it in the move
//! history and keeps the game status current.
//!
//! [`play_self_play`] is the driver loop: ask the engine for a move, apply
//! it, check for the end of the game, repeat.

use crate::error::SearchError;
use crate::search::Mcts;
use crate::{GameState, Player};
use std::fmt;
use std::time::SystemTime;
use tracing::info;

/// Result of attempting to apply a move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult<M> {
    /// Move was successfully applied
    Success {
        /// The applied move
        move_made: M,
        /// Player who made the move
        player: Player,
        /// Whether the game is now over
        game_over: bool,
        /// Winner if game is over (None for draw)
        winner: Option<Player>,
    },
    /// Move was rejected as invalid
    Invalid {
        /// Reason the move was rejected
        reason: MoveValidationError,
    },
    /// Game is already over, no more moves allowed
    GameOver,
}

/// Errors that can occur during move validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveValidationError {
    /// Move is not in the list of legal moves
    IllegalMove,
    /// The game is already in a terminal state
    GameAlreadyOver,
}

impl fmt::Display for MoveValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveValidationError::IllegalMove => write!(f, "Illegal move"),
            MoveValidationError::GameAlreadyOver => write!(f, "Game is already over"),
        }
    }
}

impl std::error::Error for MoveValidationError {}

/// A single entry in the move history
#[derive(Debug, Clone)]
pub struct MoveHistoryEntry<M> {
    /// When the move was made
    pub timestamp: SystemTime,
    /// Player who made the move
    pub player: Player,
    /// The move that was made
    pub move_made: M,
    /// Move number (1-indexed)
    pub move_number: usize,
}

impl<M> MoveHistoryEntry<M> {
    /// Create a new move history entry
    pub fn new(player: Player, move_made: M, move_number: usize) -> Self {
        Self {
            timestamp: SystemTime::now(),
            player,
            move_made,
            move_number,
        }
    }
}

/// Current game status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress
    InProgress,
    /// Game ended with a winner
    Win(Player),
    /// Game ended in a draw
    Draw,
}

impl GameStatus {
    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    fn of<S: GameState>(state: &S) -> Self {
        if !state.is_terminal() {
            GameStatus::InProgress
        } else {
            match state.get_winner() {
                Some(w) => GameStatus::Win(w),
                None => GameStatus::Draw,
            }
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Win(player) => write!(f, "{} wins", player),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

/// The central game controller that owns the authoritative game state
///
/// # Usage
/// ```rust
/// use mcts::games::tictactoe::{TicTacToeMove, TicTacToeState};
/// use mcts::{GameController, MoveResult};
///
/// let mut controller = GameController::new(TicTacToeState::new());
/// match controller.try_make_move(TicTacToeMove(4)) {
///     MoveResult::Success { game_over, .. } => assert!(!game_over),
///     other => panic!("unexpected {:?}", other),
/// }
/// assert_eq!(controller.move_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameController<S: GameState> {
    /// The authoritative game state
    game_state: S,
    /// Complete history of moves made
    move_history: Vec<MoveHistoryEntry<S::Move>>,
    /// Current game status
    status: GameStatus,
}

impl<S: GameState> GameController<S> {
    /// Create a new game controller with the given initial state
    pub fn new(initial_state: S) -> Self {
        let status = GameStatus::of(&initial_state);
        Self {
            game_state: initial_state,
            move_history: Vec::new(),
            status,
        }
    }

    /// Validate a move without applying it
    pub fn validate_move(&self, mv: &S::Move) -> Result<(), MoveValidationError> {
        if self.status.is_game_over() {
            return Err(MoveValidationError::GameAlreadyOver);
        }
        if !self.game_state.get_possible_moves().contains(mv) {
            return Err(MoveValidationError::IllegalMove);
        }
        Ok(())
    }

    /// Attempt to make a move
    ///
    /// Validates the move and applies it if valid.
    pub fn try_make_move(&mut self, mv: S::Move) -> MoveResult<S::Move> {
        match self.validate_move(&mv) {
            Ok(()) => self.record_move(mv),
            Err(MoveValidationError::GameAlreadyOver) => MoveResult::GameOver,
            Err(reason) => MoveResult::Invalid { reason },
        }
    }

    /// Apply a move that came from the engine without re-validating it
    ///
    /// The engine only returns moves from `get_possible_moves` of the state
    /// it was given, so revalidation would only repeat that work.
    pub fn apply_trusted_move(&mut self, mv: S::Move) -> MoveResult<S::Move> {
        if self.status.is_game_over() {
            return MoveResult::GameOver;
        }
        self.record_move(mv)
    }

    fn record_move(&mut self, mv: S::Move) -> MoveResult<S::Move> {
        let player = self.game_state.get_current_player();
        let move_number = self.move_history.len() + 1;

        self.game_state = self.game_state.apply_move(&mv);
        self.move_history
            .push(MoveHistoryEntry::new(player, mv.clone(), move_number));
        self.status = GameStatus::of(&self.game_state);

        let winner = match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        };

        MoveResult::Success {
            move_made: mv,
            player,
            game_over: self.status.is_game_over(),
            winner,
        }
    }

    /// Get an independent copy of the game state for the engine to search
    pub fn get_state_for_search(&self) -> S {
        self.game_state.duplicate()
    }

    /// Get a reference to the game state for rendering
    pub fn get_render_state(&self) -> &S {
        &self.game_state
    }

    /// Get the current player
    pub fn get_current_player(&self) -> Player {
        self.game_state.get_current_player()
    }

    /// Get the current game status
    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game is over
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Get the winner if the game is over
    pub fn get_winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Win(w) => Some(w),
            _ => None,
        }
    }

    /// Get the complete move history
    pub fn get_move_history(&self) -> &[MoveHistoryEntry<S::Move>] {
        &self.move_history
    }

    /// Get the number of moves made
    pub fn move_count(&self) -> usize {
        self.move_history.len()
    }

    /// Get the last move made, if any
    pub fn get_last_move(&self) -> Option<&MoveHistoryEntry<S::Move>> {
        self.move_history.last()
    }

    /// Reset the game to a new initial state
    pub fn reset(&mut self, new_state: S) {
        self.status = GameStatus::of(&new_state);
        self.game_state = new_state;
        self.move_history.clear();
    }
}

impl<S> GameController<S>
where
    S: GameState,
    S::Move: fmt::Display,
{
    /// Format the move history as numbered lines followed by the result
    pub fn format_history(&self) -> String {
        if self.move_history.is_empty() {
            return String::from("No moves made yet.");
        }

        let mut output = String::new();
        for entry in &self.move_history {
            output.push_str(&format!(
                "{}. {} - {}\n",
                entry.move_number, entry.player, entry.move_made
            ));
        }

        match self.status {
            GameStatus::InProgress => output.push_str(&format!(
                "\n(Game in progress - {} to move)\n",
                self.get_current_player()
            )),
            status => output.push_str(&format!("\nResult: {}\n", status)),
        }

        output
    }
}

/// Play `initial_state` to the end with `engine` choosing every move.
///
/// `on_move` is called after each applied move with the controller, so a
/// driver can render the board. Returns the finished controller.
pub fn play_self_play<S, F>(
    initial_state: S,
    engine: &mut Mcts,
    mut on_move: F,
) -> Result<GameController<S>, SearchError>
where
    S: GameState,
    F: FnMut(&GameController<S>),
{
    let mut controller = GameController::new(initial_state);

    while !controller.is_game_over() {
        let state = controller.get_state_for_search();
        let Some(mv) = engine.search(&state)? else {
            break;
        };

        info!(
            ply = controller.move_count() + 1,
            player = %controller.get_current_player(),
            mv = ?mv,
            "engine move"
        );

        controller.apply_trusted_move(mv);
        on_move(&controller);
    }

    info!(status = %controller.get_status(), plies = controller.move_count(), "game over");
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MctsConfig;
    use crate::games::tictactoe::{TicTacToeMove, TicTacToeState};

    #[test]
    fn test_valid_move() {
        let mut controller = GameController::new(TicTacToeState::new());
        let result = controller.try_make_move(TicTacToeMove(4));

        assert_eq!(
            result,
            MoveResult::Success {
                move_made: TicTacToeMove(4),
                player: Player::One,
                game_over: false,
                winner: None,
            }
        );
        assert_eq!(controller.get_current_player(), Player::Two);
    }

    #[test]
    fn test_invalid_move_occupied() {
        let mut controller = GameController::new(TicTacToeState::new());
        controller.try_make_move(TicTacToeMove(4));

        let result = controller.try_make_move(TicTacToeMove(4));
        assert_eq!(
            result,
            MoveResult::Invalid {
                reason: MoveValidationError::IllegalMove
            }
        );
        assert_eq!(controller.move_count(), 1);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut controller = GameController::new(TicTacToeState::new());
        for cell in [0, 3, 1, 4, 2] {
            controller.try_make_move(TicTacToeMove(cell));
        }

        assert_eq!(controller.get_status(), GameStatus::Win(Player::One));
        assert_eq!(controller.get_winner(), Some(Player::One));
        assert_eq!(controller.try_make_move(TicTacToeMove(8)), MoveResult::GameOver);
        assert_eq!(controller.apply_trusted_move(TicTacToeMove(8)), MoveResult::GameOver);
    }

    #[test]
    fn test_move_history() {
        let mut controller = GameController::new(TicTacToeState::new());
        controller.try_make_move(TicTacToeMove(0));
        controller.try_make_move(TicTacToeMove(8));

        let history = controller.get_move_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].player, Player::One);
        assert_eq!(history[0].move_number, 1);
        assert_eq!(history[1].player, Player::Two);
        assert_eq!(history[1].move_made, TicTacToeMove(8));
        assert_eq!(controller.get_last_move().map(|e| e.move_number), Some(2));
    }

    #[test]
    fn test_reset() {
        let mut controller = GameController::new(TicTacToeState::new());
        controller.try_make_move(TicTacToeMove(0));
        controller.reset(TicTacToeState::new());

        assert_eq!(controller.move_count(), 0);
        assert_eq!(controller.get_status(), GameStatus::InProgress);
    }

    #[test]
    fn test_format_history() {
        let mut controller = GameController::new(TicTacToeState::new());
        assert_eq!(controller.format_history(), "No moves made yet.");

        controller.try_make_move(TicTacToeMove(4));
        let text = controller.format_history();
        assert!(text.contains("1. Player 1 - 4"));
        assert!(text.contains("Player 2 to move"));
    }

    #[test]
    fn test_terminal_start_is_game_over() {
        let controller =
            GameController::new(TicTacToeState::from_cells([1, 1, 1, -1, -1, 0, 0, 0, 0]));
        assert!(controller.is_game_over());
    }

    #[test]
    fn test_self_play_finishes() {
        let mut engine = Mcts::new(MctsConfig::for_testing()).unwrap();
        let mut plies = 0;
        let controller =
            play_self_play(TicTacToeState::new(), &mut engine, |_| plies += 1).unwrap();

        assert!(controller.is_game_over());
        assert_eq!(controller.move_count(), plies);
        assert!(plies <= 9);
        assert!(controller.get_render_state().is_terminal());
    }
}
