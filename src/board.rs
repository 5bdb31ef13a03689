use crate::error::Result;
use std::fmt::{self, Debug, Display};
use std::ops::Neg;

/// The central trait of the library, defining the interface for a game state.
///
/// A state is an immutable position: applying a move never changes the receiver but
/// returns a fresh child state with the opponent to move. Every search strategy in this
/// crate explores a game purely through this trait.
pub trait GameState: Clone + Debug + Send + Sync {
    /// The type representing a move in the game. This could be a cell coordinate for a
    /// placement game or a coordinate pair for a sliding or capturing game.
    type Move: Clone + Debug + PartialEq + Send + Sync;

    /// Returns the player whose turn it is to make a move.
    fn active_player(&self) -> Player;

    /// Returns all legal moves available from the current state.
    ///
    /// The order is significant: searches enumerate moves in this order and break ties
    /// in favour of the earliest move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Returns the state reached by playing `mv`, with the opponent to move.
    ///
    /// Fails with [`Error::IllegalMove`](crate::error::Error::IllegalMove) when `mv` is
    /// not currently legal.
    fn apply_move(&self, mv: &Self::Move) -> Result<Self>;

    /// Returns `true` once the game is over, either because a winner is determined or
    /// because the variant's no-moves rule ends the game.
    fn is_terminal(&self) -> bool;

    /// Returns the current outcome of the game.
    fn outcome(&self) -> GameOutcome;

    /// Returns the winner of a finished game, or `None` for a draw or a game in progress.
    fn winner(&self) -> Option<Player> {
        match self.outcome() {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }
}

/// One of the two sides of a game.
///
/// The sides carry the conventional `+1`/`-1` encoding, so negation flips sides.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The side that moves first from every standard starting position.
    One = 1,
    /// The side that moves second.
    Two = -1,
}

impl Player {
    /// Returns the other side.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns `1` for [`Player::One`] and `-1` for [`Player::Two`].
    pub const fn sign(self) -> i8 {
        self as i8
    }
}

impl Neg for Player {
    type Output = Player;

    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "X"),
            Player::Two => write!(f, "O"),
        }
    }
}

/// Represents the possible outcomes of a game.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The game has ended with a winner.
    Winner(Player),
    /// The game has ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Returns `true` for any finished game.
    pub fn is_decided(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }
}

/// A cell coordinate on a square board.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets the coordinate by `(dr, dc)`, returning `None` when the result falls off
    /// an `n`×`n` board.
    pub fn offset(self, dr: isize, dc: isize, n: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < n && col < n).then_some(Coord { row, col })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Writes an `n`×`n` grid of optional marks as rows of `X`, `O` and `.`.
pub(crate) fn format_grid<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    cells: &[[Option<Player>; N]; N],
) -> fmt::Result {
    for row in cells {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(player) => player.to_string(),
                None => ".".to_string(),
            })
            .collect();
        writeln!(f, "{}", line.join(" "))?;
    }
    Ok(())
}
