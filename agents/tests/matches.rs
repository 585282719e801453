use bohnen_agents::{
    Agent, BuiltinStrategy, MatchResult, MinimaxAgent, Outcome, RandomAgent, Referee,
    DEFAULT_MOVE_LIMIT,
};
use bohnen_core::{BoardView, GameState, Side, TOTAL_SEEDS};

fn seeds_on(view: &BoardView) -> u32 {
    view.houses.iter().chain(view.stores.iter()).map(|&s| u32::from(s)).sum()
}

fn observed_game(first: &mut dyn Agent, second: &mut dyn Agent) -> (MatchResult, Vec<BoardView>) {
    let mut views = Vec::new();
    let result = Referee::new()
        .with_move_limit(DEFAULT_MOVE_LIMIT)
        .play_observed(first, second, |view| views.push(*view));
    (result, views)
}

#[test]
fn search_never_forfeits_against_builtin_strategies() {
    for strategy in BuiltinStrategy::ALL {
        for side in Side::ALL {
            let mut search = MinimaxAgent::new(3);
            let mut opponent = strategy.agent(17);
            let (result, views) = match side {
                Side::First => observed_game(&mut search, &mut opponent),
                Side::Second => observed_game(&mut opponent, &mut search),
            };

            assert!(result.forfeit.is_none(), "{strategy} vs search on {side}");
            assert!(result.truncated || views.last().unwrap().finished);
            for view in &views {
                assert_eq!(seeds_on(view), TOTAL_SEEDS);
            }
        }
    }
}

#[test]
fn turns_alternate_during_play() {
    let (result, views) =
        observed_game(&mut RandomAgent::with_seed(1), &mut RandomAgent::with_seed(2));
    assert_eq!(views.len(), result.plies + 1);
    for pair in views.windows(2) {
        assert_eq!(pair[1].turn, pair[0].turn.opponent());
    }
}

#[test]
fn seeded_games_replay_identically() {
    let play = || {
        let mut first = RandomAgent::with_seed(99);
        let mut second = BuiltinStrategy::Highest.agent(99);
        Referee::new().play(&mut first, &mut second)
    };
    assert_eq!(play(), play());
}

#[test]
fn outcome_follows_final_stores() {
    let mut first = MinimaxAgent::new(2);
    let mut second = RandomAgent::with_seed(4);
    let result = Referee::new().play(&mut first, &mut second);

    match result.outcome {
        Outcome::Win(Side::First) => assert!(result.stores[0] > result.stores[1]),
        Outcome::Win(Side::Second) => assert!(result.stores[1] > result.stores[0]),
        Outcome::Draw => assert_eq!(result.stores[0], result.stores[1]),
    }
}

#[test]
fn search_agent_plays_from_midgame() {
    let start = GameState::from_parts(
        &[0, 2, 1, 1, 3, 9, 2, 0, 1, 1, 5, 2],
        &[22, 23],
        Side::First,
    )
    .unwrap();
    let mut first = MinimaxAgent::new(4);
    let mut second = MinimaxAgent::new(2);
    let result = Referee::new().play_from(start, &mut first, &mut second, |_| {});
    assert!(result.forfeit.is_none());
    assert!(result.plies > 0);
}
