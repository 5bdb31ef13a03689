//! Decision-making agents for deterministic two-player board games.
//!
//! This library provides a uniform abstraction over immutable game states together with
//! three interchangeable strategies for picking a move: uniform random selection,
//! depth-limited minimax search with alpha-beta pruning and flat Monte Carlo evaluation
//! through random playouts. Three boards ship with the crate: tic-tac-toe, a forward-only
//! capture game in the style of checkers and reversi.
//!
//! # Example
//!
//! ```rust
//! use game_search::agent::{Agent, RandomAgent};
//! use game_search::arena::play_game;
//! use game_search::board::{GameOutcome, Player};
//! use game_search::boards::tic_tac_toe::TicTacToeState;
//! use game_search::evaluation::terminal_outcome;
//! use game_search::minimax::MinimaxAgent;
//!
//! // Create and configure a full-depth minimax agent using the builder
//! let mut minimax = MinimaxAgent::builder(9, terminal_outcome::<TicTacToeState>)
//!     .with_move_ordering(true)
//!     .build()
//!     .unwrap();
//! let mut random = RandomAgent::new();
//!
//! // Ask for a single move
//! let opening = minimax.select_move(&TicTacToeState::new()).unwrap();
//! assert!(opening.is_some());
//!
//! // Or play a whole game; the solved game never goes to the random agent
//! let record = play_game(TicTacToeState::new(), &mut minimax, &mut random).unwrap();
//! assert_ne!(record.outcome, GameOutcome::Winner(Player::Two));
//! ```

/// Agent trait shared by every strategy, and the uniform random baseline.
pub mod agent;
/// Plays agents against each other and tallies results.
pub mod arena;
/// Contains the `GameState` trait and the player, outcome and coordinate types.
pub mod board;
/// Contains pre-made implementations of the `GameState` trait.
pub mod boards;
/// Error type shared by boards, agents and the arena.
pub mod error;
/// Heuristic evaluation contract used by minimax search.
pub mod evaluation;
/// Flat Monte Carlo move evaluation by random playouts.
pub mod mcts;
/// Depth-limited minimax search with alpha-beta pruning.
pub mod minimax;
/// Per-move playout statistics gathered by the Monte Carlo agent.
pub mod move_stats;
/// Random number generators and helpers for reproducible and parallel runs.
pub mod random;

pub use agent::{Agent, RandomAgent};
pub use board::{Coord, GameOutcome, GameState, Player};
pub use error::{Error, Result};
pub use evaluation::Evaluator;
pub use mcts::MctsAgent;
pub use minimax::MinimaxAgent;
