use crate::board::GameState;
use crate::error::Result;
use crate::random::StandardRandomGenerator;
use rand::Rng;
use rand::seq::IndexedRandom;

/// A strategy that picks a move for the side to play.
///
/// `Ok(None)` means "no move": the state offers no legal move, which the driver must
/// check before applying anything.
pub trait Agent<S: GameState> {
    fn select_move(&mut self, state: &S) -> Result<Option<S::Move>>;

    /// Human-readable label used in logs and reports.
    fn name(&self) -> String;
}

/// Picks a legal move uniformly at random. Serves as the calibration baseline.
#[derive(Debug, Clone)]
pub struct RandomAgent<R = StandardRandomGenerator> {
    random: R,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self::with_random_generator(rand::rng())
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn with_random_generator(random: R) -> Self {
        Self { random }
    }
}

impl<S: GameState, R: Rng> Agent<S> for RandomAgent<R> {
    fn select_move(&mut self, state: &S) -> Result<Option<S::Move>> {
        Ok(state.legal_moves().choose(&mut self.random).cloned())
    }

    fn name(&self) -> String {
        "random".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Player};
    use crate::boards::checkers::CheckersState;
    use crate::boards::reversi::ReversiState;
    use crate::boards::tic_tac_toe::TicTacToeState;
    use crate::random::seeded;
    use std::collections::HashMap;

    fn plays_legal_moves_to_the_end<S: GameState>(initial: S, seed: u64) {
        let mut agent = RandomAgent::with_random_generator(seeded(seed));
        let mut state = initial;
        while let Some(mv) = agent.select_move(&state).unwrap() {
            assert!(state.legal_moves().contains(&mv), "seed {seed}: {mv:?}");
            state = state.apply_move(&mv).unwrap();
        }
        assert!(state.is_terminal(), "seed {seed}");
    }

    #[test]
    fn returns_only_legal_moves() {
        for seed in 0..40 {
            plays_legal_moves_to_the_end(TicTacToeState::new(), seed);
            plays_legal_moves_to_the_end(CheckersState::new(), seed);
            plays_legal_moves_to_the_end(ReversiState::new(), seed);
        }
    }

    #[test]
    fn no_move_on_exhausted_state() {
        let x = Some(Player::One);
        let o = Some(Player::Two);
        let drawn = TicTacToeState::from_board([[x, o, x], [x, o, o], [o, x, x]], Player::Two);
        let mut agent = RandomAgent::with_random_generator(seeded(7));
        assert_eq!(agent.select_move(&drawn).unwrap(), None);
    }

    #[test]
    fn distribution_is_uniform() {
        const TRIALS: usize = 9000;
        let mut agent = RandomAgent::with_random_generator(seeded(11));
        let state = TicTacToeState::new();
        let mut counts: HashMap<Coord, usize> = HashMap::new();
        for _ in 0..TRIALS {
            let mv = agent.select_move(&state).unwrap().unwrap();
            *counts.entry(mv).or_default() += 1;
        }
        assert_eq!(counts.len(), 9);

        // Chi-square with 8 degrees of freedom; 26.12 is the 0.001 critical value.
        let expected = TRIALS as f64 / 9.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum();
        assert!(chi_square < 26.12, "chi-square {chi_square}");
    }
}
