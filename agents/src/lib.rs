pub mod evaluation;
pub mod minimax;
pub mod policies;
pub mod random;
pub mod referee;
pub mod search;
pub mod tournament;

use bohnen_core::GameState;

/// Core trait for move-choosing agents
pub trait Agent {
    /// Choose a house number in `1..=6` on the side to move.
    /// Called only when the side to move has at least one legal move; returning an
    /// illegal house forfeits the game.
    fn choose_move(&mut self, state: &GameState) -> usize;

    /// Get the agent's name
    fn name(&self) -> &str;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn choose_move(&mut self, state: &GameState) -> usize {
        (**self).choose_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use policies::{
    BuiltinStrategy, HighestAgent, LeftmostAgent, LowestAgent, ParseStrategyError, RightmostAgent,
};
pub use random::RandomAgent;
pub use referee::{Forfeit, MatchResult, Outcome, Referee};
pub use search::*;
pub use tournament::{
    run_tournament, PairingReport, Tally, TournamentConfig, TournamentReport, DEFAULT_MOVE_LIMIT,
};
