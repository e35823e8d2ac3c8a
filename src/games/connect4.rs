//! # Connect 4 Game Implementation
//!
//! This module implements the classic Connect 4 board game.
//! Players take turns dropping pieces into columns, trying to get 4 pieces
//! in a row (horizontally, vertically, or diagonally).
//!
//! ## Rules
//! - Players alternate dropping pieces into columns
//! - Pieces fall to the lowest available spot in the column due to gravity
//! - First player to get 4 pieces in a row wins
//! - Game is a draw if the board fills up with no winner

use super::{owner, piece};
use crate::{GameState, Player};
use std::fmt;
use std::str::FromStr;

/// Line directions checked through the last placed piece.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Represents a move in Connect 4
///
/// Contains the column number where a player wants to drop their piece.
/// Column numbers are 0-based indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Connect4Move(pub usize);

impl fmt::Display for Connect4Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

/// Represents the complete state of a Connect 4 game
///
/// The board uses 1 for player 1 pieces, -1 for player 2 pieces, and 0 for
/// empty spaces. Row 0 is the top of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4State {
    /// The game board as a flat vector (row-major)
    board: Vec<i8>,
    /// Player to move
    current_player: Player,
    /// Board width (number of columns)
    width: usize,
    /// Board height (number of rows)
    height: usize,
    /// Number of pieces needed in a row to win
    line_size: usize,
    /// Last move made, if any (row, column)
    last_move: Option<(usize, usize)>,
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(7, 6, 4)
    }
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.height {
            for c in 0..self.width {
                let symbol = match self.cell(r, c) {
                    Some(Player::One) => "X",
                    Some(Player::Two) => "O",
                    None => ".",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Connect4State {
    /// Creates a new Connect 4 game with the specified configuration
    ///
    /// # Panics
    /// Panics if the board is empty or `line_size` is zero.
    pub fn new(width: usize, height: usize, line_size: usize) -> Self {
        assert!(width > 0 && height > 0, "board must have at least one cell");
        assert!(line_size > 0, "line size must be positive");
        Self {
            board: vec![0; width * height],
            current_player: Player::One,
            width,
            height,
            line_size,
            last_move: None,
        }
    }

    /// Gets the number of pieces needed in a row to win
    pub fn get_line_size(&self) -> usize {
        self.line_size
    }

    /// Board width and height
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Owner of the piece at (row, column), row 0 being the top
    pub fn cell(&self, row: usize, col: usize) -> Option<Player> {
        owner(self.board[row * self.width + col])
    }

    /// Checks if a move is legal in the current game state
    ///
    /// A move is legal if the column is within bounds and the top row
    /// of that column is empty (pieces can be dropped).
    pub fn is_legal(&self, mv: &Connect4Move) -> bool {
        mv.0 < self.width && self.board[mv.0] == 0
    }

    /// Counts consecutive pieces of `cell` from (row, col) in direction (dr, dc),
    /// not counting the starting square.
    fn run_length(&self, row: usize, col: usize, dr: isize, dc: isize, cell: i8) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize, col as isize);
        loop {
            r += dr;
            c += dc;
            if r < 0 || c < 0 || r >= self.height as isize || c >= self.width as isize {
                return count;
            }
            if self.board[r as usize * self.width + c as usize] != cell {
                return count;
            }
            count += 1;
        }
    }
}

impl GameState for Connect4State {
    type Move = Connect4Move; // Column to drop a piece

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.get_winner().is_some() {
            return Vec::new();
        }
        (0..self.width)
            .filter(|&c| self.board[c] == 0)
            .map(Connect4Move)
            .collect()
    }

    fn apply_move(&self, mv: &Self::Move) -> Self {
        assert!(self.is_legal(mv), "illegal Connect 4 move {:?}", mv);
        let mut next = self.clone();
        // A legal column always has an empty top cell, so the scan finds a row.
        if let Some(r) = (0..self.height)
            .rev()
            .find(|&r| self.board[r * self.width + mv.0] == 0)
        {
            next.board[r * self.width + mv.0] = piece(self.current_player);
            next.last_move = Some((r, mv.0));
        }
        next.current_player = self.current_player.opponent();
        next
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || self.board[..self.width].iter().all(|&c| c != 0)
    }

    fn get_winner(&self) -> Option<Player> {
        // Only the last piece can have completed a line.
        let (r, c) = self.last_move?;
        let cell = self.board[r * self.width + c];
        let player = owner(cell)?;

        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| {
                1 + self.run_length(r, c, dr, dc, cell) + self.run_length(r, c, -dr, -dc, cell)
                    >= self.line_size
            })
            .then_some(player)
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl FromStr for Connect4Move {
    type Err = String;

    /// Creates a Connect4Move from a string representation
    ///
    /// Expected format is just the column number as a string.
    ///
    /// # Examples
    /// ```
    /// use std::str::FromStr;
    /// use mcts::games::connect4::Connect4Move;
    /// let mv = Connect4Move::from_str("3").unwrap();
    /// assert_eq!(mv.0, 3);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        Ok(Connect4Move(c))
    }
}
