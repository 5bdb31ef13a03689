use crate::board::{GameOutcome, GameState, Player};
use crate::error::{Error, Result};

/// Score given to a won position by the terminal heuristics.
pub const WIN_SCORE: f64 = 1000.0;

/// A heuristic scoring a position for one side.
///
/// Scores are player-relative: larger is better for `player`. Every heuristic in this crate
/// is also antisymmetric, `evaluate(s, p) == -evaluate(s, p.opponent())`, which is what lets
/// minimax turn a score taken for the player active at a leaf into the root mover's view.
pub trait Evaluator<S: GameState>: Send + Sync {
    fn evaluate(&self, state: &S, player: Player) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    S: GameState,
    F: Fn(&S, Player) -> f64 + Send + Sync,
{
    fn evaluate(&self, state: &S, player: Player) -> f64 {
        self(state, player)
    }
}

/// Scores decided games as `+WIN_SCORE` for a win and `-WIN_SCORE` for a loss.
/// Draws and unfinished positions score zero.
pub fn terminal_outcome<S: GameState>(state: &S, player: Player) -> f64 {
    match state.outcome() {
        GameOutcome::Winner(winner) if winner == player => WIN_SCORE,
        GameOutcome::Winner(_) => -WIN_SCORE,
        GameOutcome::InProgress | GameOutcome::Draw => 0.0,
    }
}

/// Evaluates `state` and rejects NaN or infinite scores.
pub(crate) fn checked_score<S, E>(evaluator: &E, state: &S, player: Player) -> Result<f64>
where
    S: GameState,
    E: Evaluator<S> + ?Sized,
{
    let score = evaluator.evaluate(state, player);
    if score.is_finite() {
        Ok(score)
    } else {
        Err(Error::NonFiniteEvaluation { score })
    }
}
