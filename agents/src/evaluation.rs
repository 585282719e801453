use bohnen_core::{GameState, Side, MAJORITY};

/// Bound used for alpha-beta windows. Its negation is still representable.
pub const INFINITY: i32 = i32::MAX;

/// Score of a position where the evaluating side holds a majority.
pub const WIN_SCORE: i32 = INFINITY;

/// Score of a position where the opponent holds a majority.
pub const LOSS_SCORE: i32 = -INFINITY;

/// Evaluates a position from `side`'s perspective: store difference, or a win/loss
/// sentinel once either store holds a majority of the seeds.
pub fn evaluate(state: &GameState, side: Side) -> i32 {
    let own = u32::from(state.store(side));
    let opponent = u32::from(state.store(side.opponent()));

    if own > MAJORITY {
        WIN_SCORE
    } else if opponent > MAJORITY {
        LOSS_SCORE
    } else {
        own as i32 - opponent as i32
    }
}

/// Static evaluation for positions
pub trait Evaluatable {
    /// Score from `side`'s perspective; positive values favour `side`.
    fn evaluate_for(&self, side: Side) -> i32;

    /// Score from the perspective of the side to move.
    fn evaluate(&self) -> i32;
}

impl Evaluatable for GameState {
    fn evaluate_for(&self, side: Side) -> i32 {
        evaluate(self, side)
    }

    fn evaluate(&self) -> i32 {
        evaluate(self, self.turn())
    }
}
