//! # Game Implementations Module
//!
//! Concrete games that implement the `GameState` trait. The engine never
//! depends on them; they serve as the reference fixture for tests and as
//! the games the self-play driver can run.
//!
//! ## Supported Games
//! - **Tic-tac-toe**: the classic 3x3 three-in-a-row game
//! - **Connect 4**: gravity-based connection game, 7x6 with 4 in a row by default
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. A move type (typically a newtype over a cell or column index)
//! 2. A game state type with the GameState trait, returning a new state
//!    from `apply_move` instead of mutating
//! 3. Display and parsing implementations for moves

pub mod connect4;
pub mod tictactoe;

use crate::Player;

/// Board cell for a player's piece: `1` for player one, `-1` for player two.
fn piece(player: Player) -> i8 {
    match player {
        Player::One => 1,
        Player::Two => -1,
    }
}

/// Owner of a board cell; `0` is empty.
fn owner(cell: i8) -> Option<Player> {
    match cell {
        1 => Some(Player::One),
        -1 => Some(Player::Two),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_encoding() {
        assert_eq!(owner(piece(Player::One)), Some(Player::One));
        assert_eq!(owner(piece(Player::Two)), Some(Player::Two));
        assert_eq!(owner(0), None);
    }
}
