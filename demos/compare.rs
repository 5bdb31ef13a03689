//! Compare - pits two agents against each other over a series of games
//!
//! Runs `games` games of the chosen board with the same seat assignment and prints the
//! aggregate result. Set `RUST_LOG=game_search=debug` to see every search.

use clap::{Parser, ValueEnum};
use game_search::arena::{SeriesResults, play_series};
use game_search::boards::checkers::CheckersState;
use game_search::boards::reversi::ReversiState;
use game_search::boards::tic_tac_toe::TicTacToeState;
use game_search::mcts::DEFAULT_SIMULATIONS_PER_MOVE;
use game_search::random::seeded;
use game_search::{Agent, GameState, MctsAgent, MinimaxAgent, Player, RandomAgent, Result};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Game {
    TicTacToe,
    Checkers,
    Reversi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AgentKind {
    Random,
    Minimax,
    Mcts,
}

#[derive(Debug, Parser)]
#[command(name = "compare", about = "Play two game-search agents against each other")]
struct Args {
    /// Board to play on
    #[arg(long, value_enum, default_value_t = Game::TicTacToe)]
    game: Game,

    /// Agent playing the first seat
    #[arg(long, value_enum, default_value_t = AgentKind::Minimax)]
    first: AgentKind,

    /// Agent playing the second seat
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    second: AgentKind,

    /// Number of games in the series
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Search depth for minimax agents, in plies
    #[arg(long, default_value_t = 4)]
    depth: u32,

    /// Shuffle moves at every minimax node
    #[arg(long)]
    move_ordering: bool,

    /// Random playouts per candidate move for Monte Carlo agents
    #[arg(long, default_value_t = DEFAULT_SIMULATIONS_PER_MOVE)]
    simulations: u32,

    /// Fan root moves out to the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Seed for reproducible runs; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn build_agent<S: GameState + 'static>(
    kind: AgentKind,
    args: &Args,
    seed: u64,
    heuristic: fn(&S, Player) -> f64,
) -> Result<Box<dyn Agent<S>>> {
    let random = seeded(seed);
    let agent: Box<dyn Agent<S>> = match kind {
        AgentKind::Random => Box::new(RandomAgent::with_random_generator(random)),
        AgentKind::Minimax => Box::new(
            MinimaxAgent::builder(args.depth, heuristic)
                .with_move_ordering(args.move_ordering)
                .with_parallel(args.parallel)
                .with_random_generator(random)
                .build()?,
        ),
        AgentKind::Mcts => Box::new(
            MctsAgent::builder()
                .with_simulations_per_move(args.simulations)
                .with_parallel(args.parallel)
                .with_random_generator(random)
                .build()?,
        ),
    };
    Ok(agent)
}

fn run<S: GameState + 'static>(
    args: &Args,
    seed: u64,
    new_state: fn() -> S,
    heuristic: fn(&S, Player) -> f64,
) -> Result<SeriesResults> {
    let mut first = build_agent(args.first, args, seed, heuristic)?;
    let mut second = build_agent(args.second, args, seed.wrapping_add(1), heuristic)?;
    info!(
        game = ?args.game,
        first = %first.name(),
        second = %second.name(),
        games = args.games,
        "starting series"
    );
    play_series(new_state, first.as_mut(), second.as_mut(), args.games)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "seed selected");

    let results = match args.game {
        Game::TicTacToe => run(
            &args,
            seed,
            TicTacToeState::new,
            TicTacToeState::line_potential,
        )?,
        Game::Checkers => run(&args, seed, CheckersState::new, CheckersState::material)?,
        Game::Reversi => run(&args, seed, ReversiState::new, ReversiState::disc_difference)?,
    };

    println!("{results}");
    Ok(())
}
