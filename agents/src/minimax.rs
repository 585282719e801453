use crate::{
    search::{search_with_limits, SearchLimits, DEFAULT_DEPTH},
    Agent,
};
use bohnen_core::GameState;

/// Chooses moves with a depth-limited alpha-beta search.
pub struct MinimaxAgent {
    name: String,
    limits: SearchLimits,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            limits: SearchLimits::depth(depth),
        }
    }

    pub fn with_node_limit(depth: u8, nodes: u64) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={}, nodes={})", depth, nodes),
            limits: SearchLimits::depth(depth).with_nodes(nodes),
        }
    }

    /// Node-limited when `nodes` is set, otherwise depth-limited only.
    pub fn with_budget(depth: u8, nodes: Option<u64>) -> Self {
        match nodes {
            Some(nodes) => Self::with_node_limit(depth, nodes),
            None => Self::new(depth),
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, state: &GameState) -> usize {
        // Only reached without a legal move if the caller breaks the contract
        search_with_limits(state, self.limits).best_move.unwrap_or(1)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
