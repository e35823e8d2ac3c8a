//! # Tic-Tac-Toe Game Implementation
//!
//! The 3x3 board game used as the reference fixture for the engine.
//! Cells are numbered 0 to 8 in row-major order. Player one plays `X`
//! and always moves first.
//!
//! ## Rules
//! - Players alternate placing a mark on an empty cell
//! - Three marks in a row, column or diagonal win
//! - A full board with no line is a draw

use super::{owner, piece};
use crate::{GameState, Player};
use std::fmt;
use std::str::FromStr;

/// The eight winning lines: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A move in tic-tac-toe: the index (0-8) of the cell to mark.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToeMove(pub usize);

impl fmt::Display for TicTacToeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicTacToeMove {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cell = s.trim().parse::<usize>().map_err(|e| e.to_string())?;
        if cell >= 9 {
            return Err(format!("cell {} is off the board (expected 0-8)", cell));
        }
        Ok(TicTacToeMove(cell))
    }
}

/// The complete state of a tic-tac-toe game.
///
/// The board uses 1 for player one (`X`), -1 for player two (`O`) and 0 for
/// empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    board: [i8; 9],
    current_player: Player,
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeState {
    /// Creates an empty board with player one to move.
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: Player::One,
        }
    }

    /// Builds a position from raw cells (1, -1 or 0).
    ///
    /// Player one moves first, so the side to move is player one when both
    /// players have the same number of marks and player two otherwise.
    ///
    /// # Panics
    /// Panics if a cell is not 1, -1 or 0, or if the mark counts could not
    /// arise from alternating play.
    pub fn from_cells(board: [i8; 9]) -> Self {
        assert!(
            board.iter().all(|c| (-1..=1).contains(c)),
            "cells must be 1, -1 or 0"
        );
        let x = board.iter().filter(|&&c| c == 1).count();
        let o = board.iter().filter(|&&c| c == -1).count();
        let current_player = match x.checked_sub(o) {
            Some(0) => Player::One,
            Some(1) => Player::Two,
            _ => panic!("unreachable position: {} X marks against {} O marks", x, o),
        };
        Self {
            board,
            current_player,
        }
    }

    /// Raw board cells in row-major order.
    pub fn cells(&self) -> &[i8; 9] {
        &self.board
    }

    /// Owner of `cell`, if it is marked.
    pub fn cell(&self, cell: usize) -> Option<Player> {
        owner(self.board[cell])
    }

    /// A move is legal if it is on the board and the cell is empty.
    pub fn is_legal(&self, mv: &TicTacToeMove) -> bool {
        mv.0 < 9 && self.board[mv.0] == 0
    }

    fn is_full(&self) -> bool {
        self.board.iter().all(|&c| c != 0)
    }
}

impl GameState for TicTacToeState {
    type Move = TicTacToeMove;

    fn get_possible_moves(&self) -> Vec<Self::Move> {
        if self.get_winner().is_some() {
            return Vec::new();
        }
        (0..9)
            .filter(|&i| self.board[i] == 0)
            .map(TicTacToeMove)
            .collect()
    }

    fn apply_move(&self, mv: &Self::Move) -> Self {
        assert!(self.is_legal(mv), "illegal tic-tac-toe move {:?}", mv);
        let mut board = self.board;
        board[mv.0] = piece(self.current_player);
        Self {
            board,
            current_player: self.current_player.opponent(),
        }
    }

    fn is_terminal(&self) -> bool {
        self.get_winner().is_some() || self.is_full()
    }

    fn get_winner(&self) -> Option<Player> {
        LINES.iter().find_map(|line| {
            let sum: i8 = line.iter().map(|&i| self.board[i]).sum();
            match sum {
                3 => Some(Player::One),
                -3 => Some(Player::Two),
                _ => None,
            }
        })
    }

    fn get_current_player(&self) -> Player {
        self.current_player
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..3 {
            let row: Vec<&str> = (0..3)
                .map(|c| match self.cell(r * 3 + c) {
                    Some(Player::One) => "X",
                    Some(Player::Two) => "O",
                    None => ".",
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
