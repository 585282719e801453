//! Batch evaluation of the search agent against the built-in strategies.
//!
//! Every (search side, opponent, repetition) triple is an independent game, so the
//! games run in parallel and are aggregated afterwards in a fixed order.

use crate::minimax::MinimaxAgent;
use crate::policies::BuiltinStrategy;
use crate::referee::{MatchResult, Outcome, Referee};
use crate::search::DEFAULT_DEPTH;
use bohnen_core::Side;
use rayon::prelude::*;
use tracing::info;

/// Games longer than this are scored on the stores at that point.
pub const DEFAULT_MOVE_LIMIT: usize = 1_000;

#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub depth: u8,
    /// Node budget per search move, if any
    pub nodes: Option<u64>,
    /// Games per (side, opponent) pairing
    pub games: usize,
    pub opponents: Vec<BuiltinStrategy>,
    /// Base seed for the opponents' random choices
    pub seed: u64,
    pub move_limit: Option<usize>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            nodes: None,
            games: 10,
            opponents: BuiltinStrategy::ALL.to_vec(),
            seed: 0,
            move_limit: Some(DEFAULT_MOVE_LIMIT),
        }
    }
}

/// Win/draw/loss counts from the search agent's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub forfeits: u32,
}

impl Tally {
    pub fn record(&mut self, result: &MatchResult, side: Side) {
        match result.outcome {
            Outcome::Win(winner) if winner == side => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
        if result.forfeit.is_some_and(|f| f.side == side) {
            self.forfeits += 1;
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.draws + self.losses
    }

    /// 2 points per win, 1 per draw.
    pub fn points(&self) -> u32 {
        2 * self.wins + self.draws
    }

    pub fn merge(&mut self, other: &Tally) {
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        self.forfeits += other.forfeits;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingReport {
    pub opponent: BuiltinStrategy,
    pub search_side: Side,
    pub tally: Tally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentReport {
    pub pairings: Vec<PairingReport>,
}

impl TournamentReport {
    pub fn total(&self) -> Tally {
        let mut total = Tally::default();
        for pairing in &self.pairings {
            total.merge(&pairing.tally);
        }
        total
    }

    /// Most points the search agent could have scored.
    pub fn max_points(&self) -> u32 {
        2 * self.total().games()
    }
}

/// Plays one game with the search agent on `side`.
fn play_game(
    config: &TournamentConfig,
    referee: &Referee,
    side: Side,
    opponent: BuiltinStrategy,
    seed: u64,
) -> MatchResult {
    let mut search = MinimaxAgent::with_budget(config.depth, config.nodes);
    let mut opponent = opponent.agent(seed);
    match side {
        Side::First => referee.play(&mut search, &mut opponent),
        Side::Second => referee.play(&mut opponent, &mut search),
    }
}

/// Runs every pairing in `config` and aggregates the results.
pub fn run_tournament(config: &TournamentConfig) -> TournamentReport {
    let referee = match config.move_limit {
        Some(limit) => Referee::new().with_move_limit(limit),
        None => Referee::new(),
    };

    let pairings: Vec<(Side, BuiltinStrategy)> = Side::ALL
        .iter()
        .flat_map(|&side| config.opponents.iter().map(move |&opp| (side, opp)))
        .collect();

    let jobs: Vec<(usize, Side, BuiltinStrategy, u64)> = pairings
        .iter()
        .enumerate()
        .flat_map(|(pairing, &(side, opponent))| {
            (0..config.games).map(move |game| {
                let seed = config
                    .seed
                    .wrapping_add((pairing * config.games + game) as u64);
                (pairing, side, opponent, seed)
            })
        })
        .collect();

    let results: Vec<(usize, Side, MatchResult)> = jobs
        .into_par_iter()
        .map(|(pairing, side, opponent, seed)| {
            (pairing, side, play_game(config, &referee, side, opponent, seed))
        })
        .collect();

    let mut reports: Vec<PairingReport> = pairings
        .iter()
        .map(|&(search_side, opponent)| PairingReport {
            opponent,
            search_side,
            tally: Tally::default(),
        })
        .collect();
    for (pairing, side, result) in &results {
        reports[*pairing].tally.record(result, *side);
    }

    for report in &reports {
        info!(
            opponent = %report.opponent,
            side = %report.search_side,
            wins = report.tally.wins,
            draws = report.tally.draws,
            losses = report.tally.losses,
            points = report.tally.points(),
            "pairing finished"
        );
    }

    TournamentReport { pairings: reports }
}
