use game_search::boards::checkers::CheckersState;
use game_search::boards::reversi::ReversiState;
use game_search::boards::tic_tac_toe::TicTacToeState;
use game_search::random::seeded;
use game_search::{GameOutcome, GameState};
use quickcheck_macros::quickcheck;
use rand::seq::IndexedRandom;

/// Walks a random game from `initial`, checking the state contract at every ply.
fn random_walk_is_consistent<S: GameState>(initial: S, seed: u64) -> bool {
    let mut rng = seeded(seed);
    let mut state = initial;
    loop {
        let moves = state.legal_moves();
        if moves != state.legal_moves() || state.is_terminal() != state.is_terminal() {
            return false;
        }
        if state.is_terminal() != moves.is_empty() {
            return false;
        }
        if state.is_terminal() != state.outcome().is_decided() {
            return false;
        }
        if state.is_terminal() {
            let (outcome, winner) = (state.outcome(), state.winner());
            if outcome != state.outcome() || winner != state.winner() {
                return false;
            }
        }

        for mv in &moves {
            match state.apply_move(mv) {
                Ok(child) if child.active_player() == state.active_player().opponent() => {}
                _ => return false,
            }
        }

        let Some(mv) = moves.choose(&mut rng) else {
            return state.outcome() != GameOutcome::InProgress;
        };
        let Ok(child) = state.apply_move(mv) else {
            return false;
        };
        // The move just played never stays available to the other side.
        if child.apply_move(mv).is_ok() {
            return false;
        }
        state = child;
    }
}

#[quickcheck]
fn tic_tac_toe_walks_are_consistent(seed: u64) -> bool {
    random_walk_is_consistent(TicTacToeState::new(), seed)
}

#[quickcheck]
fn checkers_walks_are_consistent(seed: u64) -> bool {
    random_walk_is_consistent(CheckersState::new(), seed)
}

#[quickcheck]
fn reversi_walks_are_consistent(seed: u64) -> bool {
    random_walk_is_consistent(ReversiState::new(), seed)
}

#[quickcheck]
fn applying_a_move_leaves_the_parent_untouched(seed: u64) -> bool {
    let mut rng = seeded(seed);
    let state = ReversiState::new();
    let before = state.clone();
    let mv = *state.legal_moves().choose(&mut rng).unwrap();
    let _ = state.apply_move(&mv);
    state == before
}

#[test]
fn checkers_games_never_draw() {
    for seed in 0..30 {
        let mut rng = seeded(seed);
        let mut state = CheckersState::new();
        while let Some(mv) = state.legal_moves().choose(&mut rng).copied() {
            state = state.apply_move(&mv).unwrap();
        }
        assert!(matches!(state.outcome(), GameOutcome::Winner(_)));
        assert_eq!(state.winner(), Some(state.active_player().opponent()));
    }
}
