//! Contains pre-made implementations of the `GameState` trait for common games.

/// A forward-only capture game played on the dark squares of a checkers board.
pub mod checkers;
/// A `GameState` implementation for reversi.
pub mod reversi;
/// A `GameState` implementation for the game of Tic-Tac-Toe.
pub mod tic_tac_toe;
