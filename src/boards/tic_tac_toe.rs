use crate::board::{Coord, GameOutcome, GameState, Player, format_grid};
use crate::error::{Error, Result};
use crate::evaluation::terminal_outcome;
use std::fmt;

const SIZE: usize = 3;

const LINES: [[Coord; 3]; 8] = [
    [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)],
    [Coord::new(1, 0), Coord::new(1, 1), Coord::new(1, 2)],
    [Coord::new(2, 0), Coord::new(2, 1), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)],
    [Coord::new(0, 1), Coord::new(1, 1), Coord::new(2, 1)],
    [Coord::new(0, 2), Coord::new(1, 2), Coord::new(2, 2)],
    [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
    [Coord::new(0, 2), Coord::new(1, 1), Coord::new(2, 0)],
];

/// An implementation of the `GameState` trait for the game of Tic-Tac-Toe.
///
/// The board is a 3×3 grid of optional marks and a move is the coordinate of an empty
/// cell. [`Player::One`] plays `X` and moves first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicTacToeState {
    cells: [[Option<Player>; SIZE]; SIZE],
    active: Player,
}

impl TicTacToeState {
    /// Creates an empty board with player `X` to move.
    pub fn new() -> Self {
        Self::from_board([[None; SIZE]; SIZE], Player::One)
    }

    /// Creates a position from explicit cell contents.
    pub fn from_board(cells: [[Option<Player>; SIZE]; SIZE], active: Player) -> Self {
        Self { cells, active }
    }

    pub fn cells(&self) -> &[[Option<Player>; SIZE]; SIZE] {
        &self.cells
    }

    fn at(&self, coord: Coord) -> Option<Player> {
        self.cells[coord.row][coord.col]
    }

    fn line_winner(&self) -> Option<Player> {
        LINES.iter().find_map(|[a, b, c]| {
            let first = self.at(*a)?;
            (self.at(*b) == Some(first) && self.at(*c) == Some(first)).then_some(first)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Heuristic counting lines still open to `player` minus lines still open to the
    /// opponent. Decided games score as in [`terminal_outcome`].
    pub fn line_potential(state: &Self, player: Player) -> f64 {
        if state.is_terminal() {
            return terminal_outcome(state, player);
        }
        let open_for = |side: Player| {
            LINES
                .iter()
                .filter(|line| {
                    let marks: Vec<Option<Player>> = line.iter().map(|c| state.at(*c)).collect();
                    marks.contains(&Some(side)) && !marks.contains(&Some(side.opponent()))
                })
                .count() as f64
        };
        open_for(player) - open_for(player.opponent())
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToeState {
    type Move = Coord;

    fn active_player(&self) -> Player {
        self.active
    }

    fn legal_moves(&self) -> Vec<Coord> {
        if self.line_winner().is_some() {
            return Vec::new();
        }

        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| Coord::new(row, col)))
            .filter(|coord| self.at(*coord).is_none())
            .collect()
    }

    fn apply_move(&self, mv: &Coord) -> Result<Self> {
        if !self.legal_moves().contains(mv) {
            return Err(Error::illegal_move(mv));
        }
        let mut cells = self.cells;
        cells[mv.row][mv.col] = Some(self.active);
        Ok(Self::from_board(cells, self.active.opponent()))
    }

    fn is_terminal(&self) -> bool {
        self.outcome().is_decided()
    }

    fn outcome(&self) -> GameOutcome {
        match self.line_winner() {
            Some(player) => GameOutcome::Winner(player),
            None if self.is_full() => GameOutcome::Draw,
            None => GameOutcome::InProgress,
        }
    }
}

impl fmt::Display for TicTacToeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_grid(f, &self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Player> = Some(Player::One);
    const O: Option<Player> = Some(Player::Two);
    const E: Option<Player> = None;

    #[test]
    fn empty_board_offers_every_cell_in_row_major_order() {
        let moves = TicTacToeState::new().legal_moves();
        assert_eq!(moves.len(), 9);
        assert_eq!(moves[0], Coord::new(0, 0));
        assert_eq!(moves[1], Coord::new(0, 1));
        assert_eq!(moves[8], Coord::new(2, 2));
    }

    #[test]
    fn apply_move_returns_new_state() {
        let state = TicTacToeState::new();
        let child = state.apply_move(&Coord::new(1, 1)).unwrap();
        assert_eq!(state, TicTacToeState::new());
        assert_eq!(child.active_player(), Player::Two);
        assert_eq!(child.cells()[1][1], X);
        assert_eq!(child.legal_moves().len(), 8);
    }

    #[test]
    fn occupied_and_out_of_range_cells_are_illegal() {
        let state = TicTacToeState::new().apply_move(&Coord::new(0, 0)).unwrap();
        assert!(matches!(
            state.apply_move(&Coord::new(0, 0)),
            Err(Error::IllegalMove { .. })
        ));
        assert!(state.apply_move(&Coord::new(3, 0)).is_err());
    }

    #[test]
    fn full_line_wins() {
        let column = TicTacToeState::from_board([[O, X, E], [O, X, E], [E, X, E]], Player::Two);
        assert_eq!(column.outcome(), GameOutcome::Winner(Player::One));
        assert!(column.is_terminal());
        assert!(column.legal_moves().is_empty());

        let diagonal = TicTacToeState::from_board([[O, X, X], [E, O, X], [X, E, O]], Player::One);
        assert_eq!(diagonal.winner(), Some(Player::Two));
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let drawn = TicTacToeState::from_board([[X, O, X], [X, O, O], [O, X, X]], Player::Two);
        assert_eq!(drawn.outcome(), GameOutcome::Draw);
        assert_eq!(drawn.winner(), None);
        assert!(drawn.is_terminal());
    }

    #[test]
    fn line_potential_is_antisymmetric() {
        let state = TicTacToeState::from_board([[X, E, E], [E, O, E], [E, E, X]], Player::Two);
        let for_x = TicTacToeState::line_potential(&state, Player::One);
        assert_eq!(for_x, -TicTacToeState::line_potential(&state, Player::Two));
        // X holds rows 0 and 2 and columns 0 and 2; O holds row 1, column 1 and the anti-diagonal.
        assert_eq!(for_x, 1.0);
    }

    #[test]
    fn renders_marks() {
        let state = TicTacToeState::from_board([[X, E, E], [E, O, E], [E, E, E]], Player::One);
        assert_eq!(state.to_string(), "X . .\n. O .\n. . .\n");
    }
}
