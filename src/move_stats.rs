use crate::board::{GameOutcome, Player};

/// Playout statistics for one candidate move.
///
/// Wins are always counted for a fixed perspective, the player who was to move when the
/// candidate was considered.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStatistics<M> {
    /// The candidate move.
    pub mv: M,
    /// The number of playouts run after the move.
    pub playouts: u32,
    /// The number of playouts won by the perspective player.
    pub wins: u32,
    /// The number of playouts that ended in a draw.
    pub draws: u32,
}

impl<M> MoveStatistics<M> {
    pub fn new(mv: M) -> Self {
        MoveStatistics {
            mv,
            playouts: 0,
            wins: 0,
            draws: 0,
        }
    }

    /// Records the outcome of one finished playout as seen by `perspective`.
    pub fn record(&mut self, outcome: GameOutcome, perspective: Player) {
        self.playouts += 1;
        match outcome {
            GameOutcome::Winner(winner) if winner == perspective => self.wins += 1,
            GameOutcome::Draw => self.draws += 1,
            GameOutcome::Winner(_) | GameOutcome::InProgress => {}
        }
    }

    /// Calculates the win rate of this move.
    pub fn win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.playouts)
        }
    }

    /// Calculates the draw rate of this move.
    pub fn draw_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            f64::from(self.draws) / f64::from(self.playouts)
        }
    }
}
