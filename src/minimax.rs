use crate::agent::Agent;
use crate::board::{GameState, Player};
use crate::error::{Error, Result};
use crate::evaluation::{Evaluator, checked_score};
use crate::random::{self, StandardRandomGenerator};
use rand::Rng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use std::marker::PhantomData;
use std::ops::AddAssign;
use tracing::{debug, trace};

/// Node and pruning counters for one search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// States visited, the root included.
    pub nodes: u64,
    /// Subtrees abandoned because a bound was crossed.
    pub cutoffs: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// The move chosen by a search together with its minimax value.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<M> {
    pub best_move: M,
    /// Value of `best_move` from the root mover's perspective.
    pub value: f64,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, Copy)]
struct SearchSettings {
    max_depth: u32,
    move_ordering: bool,
    alpha_beta_pruning: bool,
}

/// Depth-limited minimax search with alpha-beta pruning.
///
/// Values are always expressed from the perspective of the player to move at the root.
/// The evaluator is asked for the player active at each cutoff node and its score is
/// negated whenever that player is the root mover's opponent.
pub struct MinimaxAgent<S, E, R = StandardRandomGenerator> {
    settings: SearchSettings,
    parallel: bool,
    evaluator: E,
    random: R,
    _state: PhantomData<fn() -> S>,
}

/// A builder for creating instances of `MinimaxAgent`.
pub struct MinimaxAgentBuilder<S, E, R = StandardRandomGenerator> {
    settings: SearchSettings,
    parallel: bool,
    evaluator: E,
    random: R,
    _state: PhantomData<fn() -> S>,
}

impl<S: GameState, E: Evaluator<S>> MinimaxAgent<S, E> {
    /// Returns a new builder searching `max_depth` plies with `evaluator` at the cutoff.
    pub fn builder(max_depth: u32, evaluator: E) -> MinimaxAgentBuilder<S, E> {
        MinimaxAgentBuilder {
            settings: SearchSettings {
                max_depth,
                move_ordering: false,
                alpha_beta_pruning: true,
            },
            parallel: false,
            evaluator,
            random: rand::rng(),
            _state: PhantomData,
        }
    }
}

impl<S: GameState, E: Evaluator<S>, R: Rng> MinimaxAgentBuilder<S, E, R> {
    /// Shuffles legal moves at every node before exploring them.
    pub fn with_move_ordering(mut self, move_ordering: bool) -> Self {
        self.settings.move_ordering = move_ordering;
        self
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.settings.alpha_beta_pruning = use_abp;
        self
    }

    /// Searches the subtrees of the root moves on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random number generator used for move ordering.
    pub fn with_random_generator<R2: Rng>(self, rg: R2) -> MinimaxAgentBuilder<S, E, R2> {
        MinimaxAgentBuilder {
            settings: self.settings,
            parallel: self.parallel,
            evaluator: self.evaluator,
            random: rg,
            _state: PhantomData,
        }
    }

    /// Builds the agent, rejecting a zero search depth.
    pub fn build(self) -> Result<MinimaxAgent<S, E, R>> {
        if self.settings.max_depth == 0 {
            return Err(Error::InvalidDepth);
        }
        Ok(MinimaxAgent {
            settings: self.settings,
            parallel: self.parallel,
            evaluator: self.evaluator,
            random: self.random,
            _state: PhantomData,
        })
    }
}

impl<S: GameState, E: Evaluator<S>, R: Rng> MinimaxAgent<S, E, R> {
    pub fn max_depth(&self) -> u32 {
        self.settings.max_depth
    }

    /// Searches `state` and returns the best root move with its value, or `None` when no
    /// move is legal.
    pub fn search(&mut self, state: &S) -> Result<Option<SearchOutcome<S::Move>>> {
        let root_player = state.active_player();
        let mut moves = state.legal_moves();
        if moves.is_empty() {
            return Ok(None);
        }
        if self.settings.move_ordering {
            moves.shuffle(&mut self.random);
        }

        let mut stats = SearchStats {
            nodes: 1,
            cutoffs: 0,
        };
        let scored = if self.parallel {
            self.score_root_moves_parallel(state, &moves, root_player)?
        } else {
            let mut searcher = Searcher::new(
                &self.evaluator,
                self.settings,
                root_player,
                &mut self.random,
            );
            moves
                .iter()
                .map(|mv| {
                    let score = searcher.score_root_move(state, mv)?;
                    Ok((score, std::mem::take(&mut searcher.stats)))
                })
                .collect::<Result<Vec<_>>>()?
        };

        let mut best: Option<(usize, f64)> = None;
        for (index, (score, move_stats)) in scored.into_iter().enumerate() {
            stats += move_stats;
            trace!(candidate = ?moves[index], score, "root move scored");
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((index, score)),
            }
        }

        Ok(best.map(|(index, value)| {
            debug!(
                depth = self.settings.max_depth,
                best_move = ?moves[index],
                value,
                nodes = stats.nodes,
                cutoffs = stats.cutoffs,
                "minimax search finished"
            );
            SearchOutcome {
                best_move: moves.swap_remove(index),
                value,
                stats,
            }
        }))
    }

    /// Scores each root move on its own task. Results come back in enumeration order.
    fn score_root_moves_parallel(
        &mut self,
        state: &S,
        moves: &[S::Move],
        root_player: Player,
    ) -> Result<Vec<(f64, SearchStats)>> {
        let forks = random::fork_n(&mut self.random, moves.len());
        let evaluator = &self.evaluator;
        let settings = self.settings;
        moves
            .par_iter()
            .zip(forks)
            .map(|(mv, rng)| {
                let mut searcher = Searcher::new(evaluator, settings, root_player, rng);
                let score = searcher.score_root_move(state, mv)?;
                Ok((score, searcher.stats))
            })
            .collect()
    }
}

impl<S: GameState, E: Evaluator<S>, R: Rng> Agent<S> for MinimaxAgent<S, E, R> {
    fn select_move(&mut self, state: &S) -> Result<Option<S::Move>> {
        Ok(self.search(state)?.map(|outcome| outcome.best_move))
    }

    fn name(&self) -> String {
        format!("minimax(depth={})", self.max_depth())
    }
}

/// Recursive search state for one root move or a serial sweep over all of them.
struct Searcher<'a, E, R> {
    evaluator: &'a E,
    settings: SearchSettings,
    root_player: Player,
    random: R,
    stats: SearchStats,
}

impl<'a, E, R: Rng> Searcher<'a, E, R> {
    fn new(evaluator: &'a E, settings: SearchSettings, root_player: Player, random: R) -> Self {
        Self {
            evaluator,
            settings,
            root_player,
            random,
            stats: SearchStats::default(),
        }
    }

    fn score_root_move<S>(&mut self, state: &S, mv: &S::Move) -> Result<f64>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let child = state.apply_move(mv)?;
        self.min_value(&child, f64::NEG_INFINITY, f64::INFINITY, 1)
    }

    /// Legal moves of `state`, shuffled when move ordering is on.
    fn ordered_moves<S: GameState>(&mut self, state: &S) -> Vec<S::Move> {
        let mut moves = state.legal_moves();
        if self.settings.move_ordering {
            moves.shuffle(&mut self.random);
        }
        moves
    }

    /// Scores a cutoff node, oriented to the root mover.
    fn cutoff_score<S>(&self, state: &S) -> Result<f64>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        let active = state.active_player();
        let score = checked_score(self.evaluator, state, active)?;
        Ok(if active == self.root_player {
            score
        } else {
            -score
        })
    }

    fn is_cutoff<S: GameState>(&self, state: &S, depth: u32) -> bool {
        state.is_terminal() || depth >= self.settings.max_depth
    }

    fn max_value<S>(&mut self, state: &S, mut alpha: f64, beta: f64, depth: u32) -> Result<f64>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.nodes += 1;
        if self.is_cutoff(state, depth) {
            return self.cutoff_score(state);
        }
        let moves = self.ordered_moves(state);
        if moves.is_empty() {
            return self.cutoff_score(state);
        }

        let mut value = f64::NEG_INFINITY;
        for mv in &moves {
            let child = state.apply_move(mv)?;
            value = value.max(self.min_value(&child, alpha, beta, depth + 1)?);
            if self.settings.alpha_beta_pruning && value >= beta {
                self.stats.cutoffs += 1;
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    }

    fn min_value<S>(&mut self, state: &S, alpha: f64, mut beta: f64, depth: u32) -> Result<f64>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        self.stats.nodes += 1;
        if self.is_cutoff(state, depth) {
            return self.cutoff_score(state);
        }
        let moves = self.ordered_moves(state);
        if moves.is_empty() {
            return self.cutoff_score(state);
        }

        let mut value = f64::INFINITY;
        for mv in &moves {
            let child = state.apply_move(mv)?;
            value = value.min(self.max_value(&child, alpha, beta, depth + 1)?);
            if self.settings.alpha_beta_pruning && value <= alpha {
                self.stats.cutoffs += 1;
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}
