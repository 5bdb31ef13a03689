use crate::agent::Agent;
use crate::board::{GameOutcome, GameState, Player};
use crate::error::{Error, Result};
use std::fmt;
use tracing::{debug, info, trace};

/// The result of a single finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    /// Moves played by both sides together.
    pub plies: u32,
}

/// Aggregate results of a series, counted from the seat each agent plays.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeriesResults {
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
    pub total_plies: u64,
}

impl SeriesResults {
    pub fn games(&self) -> u32 {
        self.first_wins + self.second_wins + self.draws
    }

    fn record(&mut self, game: &GameRecord) {
        match game.outcome {
            GameOutcome::Winner(Player::One) => self.first_wins += 1,
            GameOutcome::Winner(Player::Two) => self.second_wins += 1,
            GameOutcome::Draw | GameOutcome::InProgress => self.draws += 1,
        }
        self.total_plies += u64::from(game.plies);
    }

    /// Mean number of plies per game.
    pub fn average_plies(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            games => self.total_plies as f64 / f64::from(games),
        }
    }
}

impl fmt::Display for SeriesResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: first {} / second {} / draws {} (avg {:.1} plies)",
            self.games(),
            self.first_wins,
            self.second_wins,
            self.draws,
            self.average_plies()
        )
    }
}

/// Plays one game from `initial` to the end. `first` plays [`Player::One`] and `second`
/// plays [`Player::Two`].
///
/// An agent that returns no move while the game is still running fails the game with
/// [`Error::NoMoveAvailable`].
pub fn play_game<'a, S: GameState>(
    initial: S,
    first: &mut (dyn Agent<S> + 'a),
    second: &mut (dyn Agent<S> + 'a),
) -> Result<GameRecord> {
    let mut state = initial;
    let mut plies = 0;
    while !state.is_terminal() {
        let player = state.active_player();
        let agent = match player {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let mv = agent
            .select_move(&state)?
            .ok_or(Error::NoMoveAvailable { player })?;
        trace!(ply = plies, %player, agent = %agent.name(), mv = ?mv, "move played");
        state = state.apply_move(&mv)?;
        plies += 1;
    }

    let record = GameRecord {
        outcome: state.outcome(),
        plies,
    };
    debug!(outcome = ?record.outcome, plies, "game finished");
    Ok(record)
}

/// Plays `games` games, each from a fresh state built by `new_state`, with the same seat
/// assignment every time.
pub fn play_series<'a, S, F>(
    mut new_state: F,
    first: &mut (dyn Agent<S> + 'a),
    second: &mut (dyn Agent<S> + 'a),
    games: u32,
) -> Result<SeriesResults>
where
    S: GameState,
    F: FnMut() -> S,
{
    let mut results = SeriesResults::default();
    for _ in 0..games {
        let record = play_game(new_state(), first, second)?;
        results.record(&record);
    }
    info!(
        first = %first.name(),
        second = %second.name(),
        games = results.games(),
        first_wins = results.first_wins,
        second_wins = results.second_wins,
        draws = results.draws,
        "series finished"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomAgent;
    use crate::boards::checkers::CheckersState;
    use crate::boards::tic_tac_toe::TicTacToeState;
    use crate::random::seeded;

    /// Always plays the first listed move.
    struct FirstMove;

    impl<S: GameState> Agent<S> for FirstMove {
        fn select_move(&mut self, state: &S) -> Result<Option<S::Move>> {
            Ok(state.legal_moves().into_iter().next())
        }

        fn name(&self) -> String {
            "first".to_owned()
        }
    }

    /// Never has an answer.
    struct Resigner;

    impl<S: GameState> Agent<S> for Resigner {
        fn select_move(&mut self, _: &S) -> Result<Option<S::Move>> {
            Ok(None)
        }

        fn name(&self) -> String {
            "resigner".to_owned()
        }
    }

    /// Plays the first listed move and keeps a log borrowed from the caller.
    struct Recorder<'log> {
        moves: &'log mut Vec<String>,
    }

    impl<S: GameState> Agent<S> for Recorder<'_> {
        fn select_move(&mut self, state: &S) -> Result<Option<S::Move>> {
            let mv = state.legal_moves().into_iter().next();
            if let Some(mv) = &mv {
                self.moves.push(format!("{mv:?}"));
            }
            Ok(mv)
        }

        fn name(&self) -> String {
            "recorder".to_owned()
        }
    }

    #[test]
    fn borrowed_and_boxed_agents_share_a_game() {
        let mut log = Vec::new();
        let mut recorder = Recorder { moves: &mut log };
        let mut boxed: Box<dyn Agent<TicTacToeState>> =
            Box::new(RandomAgent::with_random_generator(seeded(6)));
        let record = play_game(TicTacToeState::new(), &mut recorder, boxed.as_mut()).unwrap();
        let first_plies = (record.plies as usize).div_ceil(2);
        assert_eq!(log.len(), first_plies);
        assert_eq!(log[0], "Coord { row: 0, col: 0 }");
    }

    #[test]
    fn first_move_players_end_on_the_anti_diagonal() {
        // X takes (0, 0), O (0, 1), X (0, 2), O (1, 0), ... until X completes the anti-diagonal.
        let record = play_game(TicTacToeState::new(), &mut FirstMove, &mut FirstMove).unwrap();
        assert_eq!(record.outcome, GameOutcome::Winner(Player::One));
        assert_eq!(record.plies, 7);
    }

    #[test]
    fn missing_move_in_live_game_is_an_error() {
        let result = play_game(TicTacToeState::new(), &mut FirstMove, &mut Resigner);
        assert!(matches!(
            result,
            Err(Error::NoMoveAvailable {
                player: Player::Two
            })
        ));
    }

    #[test]
    fn finished_game_plays_no_moves() {
        let x = Some(Player::One);
        let o = Some(Player::Two);
        let won = TicTacToeState::from_board(
            [[x, x, x], [o, o, None], [None, None, None]],
            Player::Two,
        );
        let record = play_game(won, &mut Resigner, &mut Resigner).unwrap();
        assert_eq!(record.plies, 0);
        assert_eq!(record.outcome, GameOutcome::Winner(Player::One));
    }

    #[test]
    fn series_counts_every_game() {
        let mut first = RandomAgent::with_random_generator(seeded(4));
        let mut second = RandomAgent::with_random_generator(seeded(5));
        let results = play_series(CheckersState::new, &mut first, &mut second, 12).unwrap();
        assert_eq!(results.games(), 12);
        assert_eq!(results.draws, 0);
        assert!(results.average_plies() > 0.0);
    }

    #[test]
    fn series_summary_renders() {
        let results = SeriesResults {
            first_wins: 3,
            second_wins: 1,
            draws: 0,
            total_plies: 30,
        };
        assert_eq!(
            results.to_string(),
            "4 games: first 3 / second 1 / draws 0 (avg 7.5 plies)"
        );
    }
}
