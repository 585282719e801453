use crate::Agent;
use bohnen_core::{BoardView, GameState, IllegalMove, Side, NUM_STORES};
use tracing::{debug, warn};

/// How a game ended, from the board's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Side),
    Draw,
}

/// An illegal move that ended the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forfeit {
    pub side: Side,
    pub house: usize,
    pub reason: IllegalMove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub outcome: Outcome,
    /// Store tally when the game stopped
    pub stores: [u8; NUM_STORES],
    /// Moves applied to the board
    pub plies: usize,
    /// Set when the game ended because a side played an illegal move
    pub forfeit: Option<Forfeit>,
    /// Set when the move limit stopped the game before it finished
    pub truncated: bool,
}

impl MatchResult {
    pub fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::Win(side) => Some(side),
            Outcome::Draw => None,
        }
    }

    /// Tournament points for `side`: 2 for a win, 1 for a draw.
    pub fn points(&self, side: Side) -> u32 {
        match self.outcome {
            Outcome::Win(winner) if winner == side => 2,
            Outcome::Win(_) => 0,
            Outcome::Draw => 1,
        }
    }
}

/// Runs games between two agents and enforces the rules.
#[derive(Debug, Clone, Default)]
pub struct Referee {
    move_limit: Option<usize>,
}

impl Referee {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops games after `plies` moves and scores them on the stores at that point.
    pub fn with_move_limit(mut self, plies: usize) -> Self {
        self.move_limit = Some(plies);
        self
    }

    /// Plays a game from the starting position; `first` moves first.
    pub fn play(&self, first: &mut dyn Agent, second: &mut dyn Agent) -> MatchResult {
        self.play_from(GameState::new(), first, second, |_| {})
    }

    /// Like `play`, reporting the board to `observer` at the start and after every move.
    pub fn play_observed(
        &self,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
        observer: impl FnMut(&BoardView),
    ) -> MatchResult {
        self.play_from(GameState::new(), first, second, observer)
    }

    /// Plays on from an arbitrary position.
    pub fn play_from(
        &self,
        start: GameState,
        first: &mut dyn Agent,
        second: &mut dyn Agent,
        mut observer: impl FnMut(&BoardView),
    ) -> MatchResult {
        let mut state = start;
        let mut plies = 0;
        let mut truncated = false;
        observer(&state.board_view());

        while !state.is_finished() {
            if self.move_limit.is_some_and(|limit| plies >= limit) {
                truncated = true;
                break;
            }

            let side = state.turn();
            let agent: &mut dyn Agent = match side {
                Side::First => &mut *first,
                Side::Second => &mut *second,
            };
            let house = agent.choose_move(&state);

            match state.apply_move(house) {
                Ok(next) => {
                    debug!(ply = plies, side = %side, agent = agent.name(), house, "move");
                    state = next;
                    plies += 1;
                    observer(&state.board_view());
                }
                Err(reason) => {
                    warn!(side = %side, agent = agent.name(), house, %reason, "forfeit");
                    return MatchResult {
                        outcome: Outcome::Win(side.opponent()),
                        stores: *state.stores(),
                        plies,
                        forfeit: Some(Forfeit {
                            side,
                            house,
                            reason,
                        }),
                        truncated: false,
                    };
                }
            }
        }

        let outcome = match state.leader() {
            Some(side) => Outcome::Win(side),
            None => Outcome::Draw,
        };
        debug!(?outcome, stores = ?state.stores(), plies, truncated, "game over");

        MatchResult {
            outcome,
            stores: *state.stores(),
            plies,
            forfeit: None,
            truncated,
        }
    }
}
