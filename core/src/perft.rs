use crate::game_state::GameState;

/// Perft (move-tree enumeration) results at each depth.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    /// Leaf moves that captured at least one house
    pub captures: u64,
    /// Leaf moves that ended the game
    pub game_ends: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.game_ends += other.game_ends;
    }
}

/// Counts the positions reachable in exactly `depth` moves.
/// Games that end early contribute nothing below the point where they end.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .filter_map(|&house| state.apply_move(house).ok())
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Performs perft with a per-move breakdown at the root.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(usize, u64)> {
    let mut results = Vec::new();

    for house in state.legal_moves() {
        let Ok(next) = state.apply_move(house) else {
            continue;
        };
        let nodes = if depth <= 1 {
            1
        } else {
            perft(&next, depth - 1)
        };
        results.push((house, nodes));
    }

    results
}

/// Performs perft and classifies the moves made at the last ply.
pub fn perft_detailed(state: &GameState, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    let mover = state.turn();
    for house in state.legal_moves() {
        let Ok(next) = state.apply_move(house) else {
            continue;
        };

        if depth == 1 {
            results.nodes += 1;
            if next.store(mover) > state.store(mover) {
                results.captures += 1;
            }
            if next.is_finished() {
                results.game_ends += 1;
            }
        } else {
            let child_results = perft_detailed(&next, depth - 1);
            results.add(&child_results);
        }
    }

    results
}
