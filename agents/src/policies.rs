//! Fixed-policy agents. Each picks a house from the seed counts on its own side alone.

use crate::random::RandomAgent;
use crate::Agent;
use bohnen_core::{GameState, HOUSES_PER_SIDE};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::str::FromStr;

/// Seed counts of the mover's houses, indexed by house number - 1.
fn own_houses(state: &GameState) -> [u8; HOUSES_PER_SIDE] {
    let mut houses = [0; HOUSES_PER_SIDE];
    let first = state.turn().first_house();
    houses.copy_from_slice(&state.houses()[first..first + HOUSES_PER_SIDE]);
    houses
}

/// Picks uniformly among the houses whose count equals the best one under `better`.
fn pick_extreme(
    rng: &mut StdRng,
    houses: &[u8; HOUSES_PER_SIDE],
    better: impl Fn(u8, u8) -> bool,
) -> usize {
    let mut candidates: Vec<usize> = Vec::with_capacity(HOUSES_PER_SIDE);
    for (i, &seeds) in houses.iter().enumerate() {
        if seeds == 0 {
            continue;
        }
        match candidates.last() {
            Some(&best) if better(seeds, houses[best]) => {
                candidates.clear();
                candidates.push(i);
            }
            Some(&best) if seeds == houses[best] => candidates.push(i),
            Some(_) => {}
            None => candidates.push(i),
        }
    }
    candidates.choose(rng).map_or(1, |&i| i + 1)
}

/// Plays the lowest-numbered non-empty house.
#[derive(Debug, Default)]
pub struct LeftmostAgent;

impl Agent for LeftmostAgent {
    fn choose_move(&mut self, state: &GameState) -> usize {
        own_houses(state)
            .iter()
            .position(|&seeds| seeds > 0)
            .map_or(1, |i| i + 1)
    }

    fn name(&self) -> &str {
        "Leftmost"
    }
}

/// Plays the highest-numbered non-empty house.
#[derive(Debug, Default)]
pub struct RightmostAgent;

impl Agent for RightmostAgent {
    fn choose_move(&mut self, state: &GameState) -> usize {
        own_houses(state)
            .iter()
            .rposition(|&seeds| seeds > 0)
            .map_or(1, |i| i + 1)
    }

    fn name(&self) -> &str {
        "Rightmost"
    }
}

/// Plays the fullest house, breaking ties at random.
pub struct HighestAgent {
    rng: StdRng,
}

impl HighestAgent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for HighestAgent {
    fn choose_move(&mut self, state: &GameState) -> usize {
        pick_extreme(&mut self.rng, &own_houses(state), |a, b| a > b)
    }

    fn name(&self) -> &str {
        "Highest"
    }
}

/// Plays the emptiest non-empty house, breaking ties at random.
pub struct LowestAgent {
    rng: StdRng,
}

impl LowestAgent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for LowestAgent {
    fn choose_move(&mut self, state: &GameState) -> usize {
        pick_extreme(&mut self.rng, &own_houses(state), |a, b| a < b)
    }

    fn name(&self) -> &str {
        "Lowest"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy '{0}' (expected random, leftmost, rightmost, highest or lowest)")]
pub struct ParseStrategyError(String);

/// The built-in opponents used for evaluating the search agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinStrategy {
    Random,
    Leftmost,
    Rightmost,
    Highest,
    Lowest,
}

impl BuiltinStrategy {
    pub const ALL: [BuiltinStrategy; 5] = [
        BuiltinStrategy::Random,
        BuiltinStrategy::Leftmost,
        BuiltinStrategy::Rightmost,
        BuiltinStrategy::Highest,
        BuiltinStrategy::Lowest,
    ];

    /// Builds an agent for this strategy. `seed` drives any random tie-breaking.
    pub fn agent(self, seed: u64) -> Box<dyn Agent + Send> {
        match self {
            BuiltinStrategy::Random => Box::new(RandomAgent::with_seed(seed)),
            BuiltinStrategy::Leftmost => Box::new(LeftmostAgent),
            BuiltinStrategy::Rightmost => Box::new(RightmostAgent),
            BuiltinStrategy::Highest => Box::new(HighestAgent::with_seed(seed)),
            BuiltinStrategy::Lowest => Box::new(LowestAgent::with_seed(seed)),
        }
    }
}

impl fmt::Display for BuiltinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuiltinStrategy::Random => "random",
            BuiltinStrategy::Leftmost => "leftmost",
            BuiltinStrategy::Rightmost => "rightmost",
            BuiltinStrategy::Highest => "highest",
            BuiltinStrategy::Lowest => "lowest",
        };
        f.write_str(name)
    }
}

impl FromStr for BuiltinStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStrategyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bohnen_core::Side;

    fn sparse_state() -> GameState {
        // First holds 0, 3, 0, 1, 3, 1 and moves; Second holds 9, 0, 0, 9, 1, 9
        GameState::from_parts(
            &[0, 3, 0, 1, 3, 1, 9, 0, 0, 9, 1, 9],
            &[20, 16],
            Side::First,
        )
        .unwrap()
    }

    #[test]
    fn test_leftmost_and_rightmost() {
        let state = sparse_state();
        assert_eq!(LeftmostAgent.choose_move(&state), 2);
        assert_eq!(RightmostAgent.choose_move(&state), 6);

        let second = state.apply_move(2).unwrap();
        assert_eq!(second.turn(), Side::Second);
        assert_eq!(LeftmostAgent.choose_move(&second), 1);
        assert_eq!(RightmostAgent.choose_move(&second), 6);
    }

    #[test]
    fn test_highest_breaks_ties_among_fullest() {
        let state = sparse_state();
        let mut agent = HighestAgent::with_seed(3);
        let mut seen = Vec::new();
        for _ in 0..100 {
            let house = agent.choose_move(&state);
            assert!(house == 2 || house == 5, "house {house} is not fullest");
            seen.push(house);
        }
        assert!(seen.contains(&2) && seen.contains(&5));
    }

    #[test]
    fn test_lowest_skips_empty_houses() {
        let state = sparse_state();
        let mut agent = LowestAgent::with_seed(11);
        for _ in 0..100 {
            let house = agent.choose_move(&state);
            assert!(house == 4 || house == 6, "house {house} is not emptiest");
        }
    }

    #[test]
    fn test_every_strategy_plays_legally() {
        let mut state = GameState::new();
        for strategy in BuiltinStrategy::ALL {
            let mut agent = strategy.agent(5);
            let house = agent.choose_move(&state);
            assert!(state.is_legal(house), "{strategy} chose {house}");
            state = state.apply_move(house).unwrap();
        }
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("leftmost".parse::<BuiltinStrategy>(), Ok(BuiltinStrategy::Leftmost));
        assert_eq!("Highest".parse::<BuiltinStrategy>(), Ok(BuiltinStrategy::Highest));
        assert!("minimax".parse::<BuiltinStrategy>().is_err());
        for strategy in BuiltinStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<BuiltinStrategy>(), Ok(strategy));
        }
    }
}
