use crate::board::Player;
use thiserror::Error;

/// Errors that can occur while configuring agents, searching or playing games.
#[derive(Debug, Error)]
pub enum Error {
    /// A move was applied that the state does not list as legal.
    #[error("illegal move {mv}")]
    IllegalMove { mv: String },

    #[error("search depth must be at least one ply")]
    InvalidDepth,

    #[error("simulations per move must be at least one")]
    InvalidSimulationCount,

    /// The heuristic produced a NaN or infinite score.
    #[error("evaluation function returned non-finite score {score}")]
    NonFiniteEvaluation { score: f64 },

    /// An agent had nothing to play although the game is still in progress.
    #[error("agent for player {player} returned no move in a live position")]
    NoMoveAvailable { player: Player },
}

impl Error {
    pub(crate) fn illegal_move(mv: &impl std::fmt::Debug) -> Self {
        Error::IllegalMove {
            mv: format!("{mv:?}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
