use crate::board::{Coord, GameOutcome, GameState, Player, format_grid};
use crate::error::{Error, Result};
use crate::evaluation::terminal_outcome;
use std::cmp::Ordering;
use std::fmt;

pub const SIZE: usize = 8;

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ReversiMove {
    /// Places a disc on an empty cell, flipping every bracketed opponent disc.
    Place(Coord),
    /// Hands the turn over. Only legal when the mover has no placement but the opponent does.
    Pass,
}

/// An implementation of the `GameState` trait for reversi on an 8×8 board.
///
/// The game ends once neither side can place a disc; the side with more discs wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReversiState {
    cells: [[Option<Player>; SIZE]; SIZE],
    active: Player,
}

impl ReversiState {
    /// Creates the standard starting position with [`Player::One`] to move.
    pub fn new() -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        cells[3][3] = Some(Player::Two);
        cells[4][4] = Some(Player::Two);
        cells[3][4] = Some(Player::One);
        cells[4][3] = Some(Player::One);
        Self::from_board(cells, Player::One)
    }

    /// Creates a position from explicit cell contents.
    pub fn from_board(cells: [[Option<Player>; SIZE]; SIZE], active: Player) -> Self {
        Self { cells, active }
    }

    pub fn cells(&self) -> &[[Option<Player>; SIZE]; SIZE] {
        &self.cells
    }

    pub fn disc_count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(player))
            .count()
    }

    fn at(&self, coord: Coord) -> Option<Player> {
        self.cells[coord.row][coord.col]
    }

    /// Opponent discs that a disc placed by `player` at `origin` would flip.
    fn flipped_discs(&self, origin: Coord, player: Player) -> Vec<Coord> {
        let mut flips = Vec::new();
        for (dr, dc) in DIRECTIONS {
            let mut run = Vec::new();
            let mut next = origin.offset(dr, dc, SIZE);
            while let Some(coord) = next {
                match self.at(coord) {
                    Some(owner) if owner == player.opponent() => run.push(coord),
                    Some(_) => {
                        flips.append(&mut run);
                        break;
                    }
                    None => break,
                }
                next = coord.offset(dr, dc, SIZE);
            }
        }
        flips
    }

    /// Empty cells where `player` could place a disc, in row-major order.
    fn placements(&self, player: Player) -> Vec<Coord> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Coord::new(row, col)))
            .filter(|coord| self.at(*coord).is_none())
            .filter(|coord| !self.flipped_discs(*coord, player).is_empty())
            .collect()
    }

    fn can_place(&self, player: Player) -> bool {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Coord::new(row, col)))
            .any(|coord| self.at(coord).is_none() && !self.flipped_discs(coord, player).is_empty())
    }

    /// Heuristic scoring the disc difference for `player`. Decided games score as in
    /// [`terminal_outcome`].
    pub fn disc_difference(state: &Self, player: Player) -> f64 {
        if state.is_terminal() {
            return terminal_outcome(state, player);
        }
        state.disc_count(player) as f64 - state.disc_count(player.opponent()) as f64
    }
}

impl Default for ReversiState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ReversiState {
    type Move = ReversiMove;

    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves(&self) -> Vec<ReversiMove> {
        let placements = self.placements(self.active);
        if !placements.is_empty() {
            placements.into_iter().map(ReversiMove::Place).collect()
        } else if self.can_place(self.active.opponent()) {
            vec![ReversiMove::Pass]
        } else {
            Vec::new()
        }
    }

    fn apply_move(&self, mv: &ReversiMove) -> Result<Self> {
        if !self.legal_moves().contains(mv) {
            return Err(Error::illegal_move(mv));
        }
        let mut cells = self.cells;
        if let ReversiMove::Place(origin) = *mv {
            for flipped in self.flipped_discs(origin, self.active) {
                cells[flipped.row][flipped.col] = Some(self.active);
            }
            cells[origin.row][origin.col] = Some(self.active);
        }
        Ok(Self::from_board(cells, self.active.opponent()))
    }

    fn is_terminal(&self) -> bool {
        !self.can_place(self.active) && !self.can_place(self.active.opponent())
    }

    fn outcome(&self) -> GameOutcome {
        if !self.is_terminal() {
            return GameOutcome::InProgress;
        }
        match self
            .disc_count(Player::One)
            .cmp(&self.disc_count(Player::Two))
        {
            Ordering::Greater => GameOutcome::Winner(Player::One),
            Ordering::Less => GameOutcome::Winner(Player::Two),
            Ordering::Equal => GameOutcome::Draw,
        }
    }
}

impl fmt::Display for ReversiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_grid(f, &self.cells)
    }
}
