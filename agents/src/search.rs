use crate::evaluation::{Evaluatable, INFINITY};
use bohnen_core::{GameState, Side, HOUSES_PER_SIDE};
use tracing::{debug, trace};

/// Plies searched by default, counting the root move.
pub const DEFAULT_DEPTH: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// House number (1..=6) to play, `None` if the side to move has no legal move
    pub best_move: Option<usize>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub stopped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    /// Optional node budget; the search stops and keeps its best completed root move once spent
    pub nodes: Option<u64>,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self {
            max_depth: depth,
            nodes: None,
        }
    }

    pub fn with_nodes(self, nodes: u64) -> Self {
        Self {
            nodes: Some(nodes),
            ..self
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}

struct SearchInfo {
    limits: SearchLimits,
    /// The side the search maximises for
    side: Side,
    nodes: u64,
    stopped: bool,
}

impl SearchInfo {
    fn new(limits: SearchLimits, side: Side) -> Self {
        Self {
            limits,
            side,
            nodes: 0,
            stopped: false,
        }
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        if let Some(max_nodes) = self.limits.nodes {
            if self.nodes > max_nodes {
                self.stopped = true;
                return true;
            }
        }

        false
    }
}

/// Searches to a fixed depth for the side to move.
pub fn search(state: &GameState, depth: u8) -> SearchResult {
    search_with_limits(state, SearchLimits::depth(depth))
}

/// Minimax with alpha-beta pruning. Candidates are tried in ascending house order and the
/// first house reaching the best score is kept, so the result is deterministic.
pub fn search_with_limits(state: &GameState, limits: SearchLimits) -> SearchResult {
    let mut info = SearchInfo::new(limits, state.turn());

    if limits.max_depth == 0 || state.is_finished() {
        return SearchResult {
            best_move: state.legal_moves().first().copied(),
            score: state.evaluate_for(info.side),
            depth: 0,
            nodes: 1,
            stopped: false,
        };
    }

    let (score, best_move) = alpha_beta_root(state, limits.max_depth, &mut info);

    let result = SearchResult {
        // Fall back to the first legal move if the budget ran out before any root move finished
        best_move: best_move.or_else(|| state.legal_moves().first().copied()),
        score,
        depth: limits.max_depth,
        nodes: info.nodes,
        stopped: info.stopped,
    };
    debug!(
        side = %info.side,
        best_move = ?result.best_move,
        score = result.score,
        nodes = result.nodes,
        stopped = result.stopped,
        "search complete"
    );
    result
}

fn alpha_beta_root(state: &GameState, depth: u8, info: &mut SearchInfo) -> (i32, Option<usize>) {
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best_move = None;
    let mut best_score = -INFINITY;

    for house in 1..=HOUSES_PER_SIDE {
        let Ok(next) = state.apply_move(house) else {
            continue;
        };
        let score = alpha_beta(&next, depth - 1, alpha, beta, info);

        if info.stopped {
            break;
        }
        trace!(house, score, "root candidate");

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(house);
        }

        alpha = alpha.max(score);
    }

    (best_score, best_move)
}

fn alpha_beta(
    state: &GameState,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    info: &mut SearchInfo,
) -> i32 {
    info.nodes += 1;

    if info.should_stop() {
        return 0;
    }

    if depth == 0 || state.is_finished() {
        return state.evaluate_for(info.side);
    }

    let maximizing = state.turn() == info.side;
    let mut value = if maximizing { -INFINITY } else { INFINITY };
    let mut searched = false;

    for house in 1..=HOUSES_PER_SIDE {
        // Empty houses are skipped, not penalised
        let Ok(next) = state.apply_move(house) else {
            continue;
        };
        let score = alpha_beta(&next, depth - 1, alpha, beta, info);

        if info.stopped {
            return value;
        }
        searched = true;

        if maximizing {
            value = value.max(score);
            alpha = alpha.max(value);
        } else {
            value = value.min(score);
            beta = beta.min(value);
        }

        if beta <= alpha {
            break;
        }
    }

    if searched {
        value
    } else {
        state.evaluate_for(info.side)
    }
}

/// Plain minimax over the same tree as `search`, without pruning.
/// Serves as the reference the pruned search must agree with.
pub fn minimax(state: &GameState, depth: u8) -> SearchResult {
    let side = state.turn();
    let mut nodes = 0;

    if depth == 0 || state.is_finished() {
        return SearchResult {
            best_move: state.legal_moves().first().copied(),
            score: state.evaluate_for(side),
            depth: 0,
            nodes: 1,
            stopped: false,
        };
    }

    let mut best_move = None;
    let mut best_score = -INFINITY;
    for house in 1..=HOUSES_PER_SIDE {
        let Ok(next) = state.apply_move(house) else {
            continue;
        };
        let score = minimax_value(&next, depth - 1, side, &mut nodes);
        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(house);
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        depth,
        nodes,
        stopped: false,
    }
}

fn minimax_value(state: &GameState, depth: u8, side: Side, nodes: &mut u64) -> i32 {
    *nodes += 1;

    if depth == 0 || state.is_finished() {
        return state.evaluate_for(side);
    }

    let scores = (1..=HOUSES_PER_SIDE)
        .filter_map(|house| state.apply_move(house).ok())
        .map(|next| minimax_value(&next, depth - 1, side, nodes));

    let best = if state.turn() == side {
        scores.max()
    } else {
        scores.min()
    };
    best.unwrap_or_else(|| state.evaluate_for(side))
}
