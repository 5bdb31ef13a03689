use crate::agent::Agent;
use crate::board::{GameOutcome, GameState, Player};
use crate::error::{Error, Result};
use crate::move_stats::MoveStatistics;
use crate::random::{self, StandardRandomGenerator};
use rand::Rng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use tracing::{debug, trace};

/// Number of playouts run per candidate move unless configured otherwise.
pub const DEFAULT_SIMULATIONS_PER_MOVE: u32 = 50;

/// Flat Monte Carlo move evaluation.
///
/// Every legal move is scored by the share of random playouts from the resulting state
/// that the mover goes on to win. No tree is kept and nothing is reused between calls.
pub struct MctsAgent<R = StandardRandomGenerator> {
    simulations_per_move: u32,
    parallel: bool,
    random: R,
}

/// A builder for creating instances of `MctsAgent`.
pub struct MctsAgentBuilder<R = StandardRandomGenerator> {
    simulations_per_move: u32,
    parallel: bool,
    random: R,
}

impl MctsAgent {
    /// Returns a new builder for `MctsAgent`.
    pub fn builder() -> MctsAgentBuilder {
        MctsAgentBuilder {
            simulations_per_move: DEFAULT_SIMULATIONS_PER_MOVE,
            parallel: false,
            random: rand::rng(),
        }
    }
}

impl<R: Rng> MctsAgentBuilder<R> {
    pub fn with_simulations_per_move(mut self, simulations: u32) -> Self {
        self.simulations_per_move = simulations;
        self
    }

    /// Runs the playout batches of different candidates on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random number generator for the playouts.
    pub fn with_random_generator<R2: Rng>(self, rg: R2) -> MctsAgentBuilder<R2> {
        MctsAgentBuilder {
            simulations_per_move: self.simulations_per_move,
            parallel: self.parallel,
            random: rg,
        }
    }

    /// Builds the agent, rejecting a zero simulation count.
    pub fn build(self) -> Result<MctsAgent<R>> {
        if self.simulations_per_move == 0 {
            return Err(Error::InvalidSimulationCount);
        }
        Ok(MctsAgent {
            simulations_per_move: self.simulations_per_move,
            parallel: self.parallel,
            random: self.random,
        })
    }
}

impl<R: Rng> MctsAgent<R> {
    pub fn simulations_per_move(&self) -> u32 {
        self.simulations_per_move
    }

    /// Runs the playouts for every legal move of `state` and returns their statistics in
    /// the order the moves were listed.
    ///
    /// Each candidate draws from its own generator forked off the agent's, so a parallel
    /// run reproduces the serial one for the same seed.
    pub fn evaluate_moves<S: GameState>(
        &mut self,
        state: &S,
    ) -> Result<Vec<MoveStatistics<S::Move>>> {
        let perspective = state.active_player();
        let moves = state.legal_moves();
        let simulations = self.simulations_per_move;

        let forks = random::fork_n(&mut self.random, moves.len());
        if self.parallel {
            moves
                .into_par_iter()
                .zip(forks)
                .map(|(mv, mut rng)| run_candidate(state, mv, perspective, simulations, &mut rng))
                .collect()
        } else {
            moves
                .into_iter()
                .zip(forks)
                .map(|(mv, mut rng)| run_candidate(state, mv, perspective, simulations, &mut rng))
                .collect()
        }
    }
}

impl<S: GameState, R: Rng> Agent<S> for MctsAgent<R> {
    fn select_move(&mut self, state: &S) -> Result<Option<S::Move>> {
        let statistics = self.evaluate_moves(state)?;

        let mut best: Option<&MoveStatistics<S::Move>> = None;
        for candidate in &statistics {
            trace!(
                candidate = ?candidate.mv,
                wins = candidate.wins,
                draws = candidate.draws,
                playouts = candidate.playouts,
                "candidate evaluated"
            );
            match best {
                Some(current) if candidate.win_rate() <= current.win_rate() => {}
                _ => best = Some(candidate),
            }
        }

        Ok(best.map(|chosen| {
            debug!(
                best_move = ?chosen.mv,
                win_rate = chosen.win_rate(),
                candidates = statistics.len(),
                "monte carlo evaluation finished"
            );
            chosen.mv.clone()
        }))
    }

    fn name(&self) -> String {
        format!("mcts(simulations={})", self.simulations_per_move)
    }
}

/// Applies `mv` and records `simulations` playouts from the resulting state.
fn run_candidate<S: GameState, R: Rng + ?Sized>(
    state: &S,
    mv: S::Move,
    perspective: Player,
    simulations: u32,
    rng: &mut R,
) -> Result<MoveStatistics<S::Move>> {
    let child = state.apply_move(&mv)?;
    let mut statistics = MoveStatistics::new(mv);
    for _ in 0..simulations {
        statistics.record(random_playout(&child, rng)?, perspective);
    }
    Ok(statistics)
}

/// Plays uniformly random moves from `state` until the game ends or the active player has
/// no legal move, and returns the outcome of the final state.
pub fn random_playout<S: GameState, R: Rng + ?Sized>(
    state: &S,
    rng: &mut R,
) -> Result<GameOutcome> {
    let mut current = state.clone();
    while !current.is_terminal() {
        let moves = current.legal_moves();
        let Some(mv) = moves.choose(rng) else {
            break;
        };
        current = current.apply_move(mv)?;
    }
    Ok(current.outcome())
}
