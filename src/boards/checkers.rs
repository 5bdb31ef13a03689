use crate::board::{Coord, GameOutcome, GameState, Player, format_grid};
use crate::error::{Error, Result};
use crate::evaluation::terminal_outcome;
use std::fmt;

pub const SIZE: usize = 8;

/// A piece moving from one dark square to another, either one diagonal step or a jump
/// over an enemy piece.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Step {
    pub from: Coord,
    pub to: Coord,
}

impl Step {
    pub fn is_capture(&self) -> bool {
        self.from.row.abs_diff(self.to.row) == 2
    }

    /// The square jumped over by a capture.
    fn captured(&self) -> Coord {
        Coord::new(
            (self.from.row + self.to.row) / 2,
            (self.from.col + self.to.col) / 2,
        )
    }
}

/// A checkers-like game where pieces only ever move forward.
///
/// [`Player::Two`] starts on rows 0 to 2 and moves down the board, [`Player::One`] starts
/// on rows 5 to 7, moves up and plays first. A piece may step diagonally forward onto an
/// empty square or jump a single adjacent enemy piece, removing it. Captures are optional
/// and chains are not continued. Pieces do not promote, so a piece on the far row is
/// stuck. The side left without a legal move loses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckersState {
    cells: [[Option<Player>; SIZE]; SIZE],
    active: Player,
}

impl CheckersState {
    /// Creates the standard starting position with [`Player::One`] to move.
    pub fn new() -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        for (row, line) in cells.iter_mut().enumerate() {
            let owner = match row {
                0..=2 => Player::Two,
                5..=7 => Player::One,
                _ => continue,
            };
            for (col, cell) in line.iter_mut().enumerate() {
                if (row + col) % 2 == 1 {
                    *cell = Some(owner);
                }
            }
        }
        Self::from_board(cells, Player::One)
    }

    /// Creates a position from explicit cell contents.
    pub fn from_board(cells: [[Option<Player>; SIZE]; SIZE], active: Player) -> Self {
        Self { cells, active }
    }

    pub fn cells(&self) -> &[[Option<Player>; SIZE]; SIZE] {
        &self.cells
    }

    pub fn piece_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(player))
            .count()
    }

    fn at(&self, coord: Coord) -> Option<Player> {
        self.cells[coord.row][coord.col]
    }

    fn forward(player: Player) -> isize {
        match player {
            Player::One => -1,
            Player::Two => 1,
        }
    }

    /// Heuristic scoring the piece difference for `player`. Decided games score as in
    /// [`terminal_outcome`].
    pub fn material(state: &Self, player: Player) -> f64 {
        if state.is_terminal() {
            return terminal_outcome(state, player);
        }
        state.piece_count(player) as f64 - state.piece_count(player.opponent()) as f64
    }
}

impl Default for CheckersState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for CheckersState {
    type Move = Step;

    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves(&self) -> Vec<Step> {
        let dr = Self::forward(self.active);
        let mut moves = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let from = Coord::new(row, col);
                if self.at(from) != Some(self.active) {
                    continue;
                }
                for dc in [-1, 1] {
                    let Some(to) = from.offset(dr, dc, SIZE) else {
                        continue;
                    };
                    if self.at(to).is_none() {
                        moves.push(Step { from, to });
                    }
                    if let Some(landing) = from.offset(2 * dr, 2 * dc, SIZE)
                        && self.at(to) == Some(self.active.opponent())
                        && self.at(landing).is_none()
                    {
                        moves.push(Step { from, to: landing });
                    }
                }
            }
        }
        moves
    }

    fn apply_move(&self, mv: &Step) -> Result<Self> {
        if !self.legal_moves().contains(mv) {
            return Err(Error::illegal_move(mv));
        }
        let mut cells = self.cells;
        cells[mv.to.row][mv.to.col] = cells[mv.from.row][mv.from.col].take();
        if mv.is_capture() {
            let captured = mv.captured();
            cells[captured.row][captured.col] = None;
        }
        Ok(Self::from_board(cells, self.active.opponent()))
    }

    fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    fn outcome(&self) -> GameOutcome {
        if self.is_terminal() {
            GameOutcome::Winner(self.active.opponent())
        } else {
            GameOutcome::InProgress
        }
    }
}

impl fmt::Display for CheckersState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_grid(f, &self.cells)
    }
}
