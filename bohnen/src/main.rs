mod display;
mod interactive;

use anyhow::{Context, Result};
use bohnen_agents::{
    minimax, run_tournament, search_with_limits, Agent, BuiltinStrategy, Evaluatable, MatchResult,
    MinimaxAgent, ParseStrategyError, Referee, SearchLimits, TournamentConfig, DEFAULT_DEPTH,
    DEFAULT_MOVE_LIMIT,
};
use bohnen_core::{perft, perft_detailed, perft_divide, GameState, Side};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bohnen", version, about = "Bohnenspiel engine and match runner")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "BOHNEN_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game between two agents
    Match {
        /// `search` or one of random, leftmost, rightmost, highest, lowest
        first: AgentChoice,
        second: AgentChoice,
        #[arg(long, env = "BOHNEN_DEPTH", default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        #[arg(long, env = "BOHNEN_SEED", default_value_t = 0)]
        seed: u64,
        /// Node budget per search move
        #[arg(long)]
        nodes: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_MOVE_LIMIT)]
        move_limit: usize,
        /// Print the board after every move
        #[arg(short, long)]
        verbose: bool,
    },
    /// Play the search agent against the built-in strategies from both sides
    Tournament {
        /// Games per opponent and side
        #[arg(long, default_value_t = 10)]
        games: usize,
        #[arg(long, env = "BOHNEN_DEPTH", default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        #[arg(long, env = "BOHNEN_SEED", default_value_t = 0)]
        seed: u64,
        /// Node budget per search move
        #[arg(long)]
        nodes: Option<u64>,
        /// Comma-separated strategies; all of them when omitted
        #[arg(long, value_delimiter = ',')]
        opponents: Vec<BuiltinStrategy>,
    },
    /// Search a position and print the chosen move
    Search {
        /// Twelve comma-separated house counts, first's houses then second's
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "stores")]
        houses: Option<Vec<i32>>,
        /// First's and second's store counts
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "houses")]
        stores: Option<Vec<i32>>,
        #[arg(long, value_enum, default_value_t = SideArg::First)]
        turn: SideArg,
        #[arg(long, env = "BOHNEN_DEPTH", default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        /// Stop after this many nodes
        #[arg(long)]
        nodes: Option<u64>,
        /// Also run the unpruned search and compare
        #[arg(long)]
        verify: bool,
    },
    /// Count the leaf positions reachable from the start
    Perft {
        depth: u8,
        /// Break the count down by first move
        #[arg(long)]
        divide: bool,
    },
    /// Play against the search agent in the terminal
    Play {
        #[arg(long, value_enum, default_value_t = SideArg::First)]
        side: SideArg,
        #[arg(long, env = "BOHNEN_DEPTH", default_value_t = DEFAULT_DEPTH)]
        depth: u8,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SideArg {
    First,
    Second,
}

impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::First => Side::First,
            SideArg::Second => Side::Second,
        }
    }
}

/// An agent named on the command line.
#[derive(Clone, Copy, Debug)]
enum AgentChoice {
    Search,
    Builtin(BuiltinStrategy),
}

impl FromStr for AgentChoice {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("search") || s.eq_ignore_ascii_case("minimax") {
            return Ok(AgentChoice::Search);
        }
        s.parse().map(AgentChoice::Builtin)
    }
}

impl AgentChoice {
    fn build(self, depth: u8, nodes: Option<u64>, seed: u64) -> Box<dyn Agent + Send> {
        match self {
            AgentChoice::Search => Box::new(MinimaxAgent::with_budget(depth, nodes)),
            AgentChoice::Builtin(strategy) => strategy.agent(seed),
        }
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn print_board(state: &GameState) -> Result<()> {
    let view = state.board_view();
    display::draw_board(&mut io::stdout(), &view, Side::First, "\n")?;
    println!("{}", display::status_line(&view));
    Ok(())
}

fn print_result(result: &MatchResult, first: &str, second: &str) {
    let [first_store, second_store] = result.stores;
    match result.winner() {
        Some(Side::First) => println!("{first} (first) wins {first_store}-{second_store}"),
        Some(Side::Second) => println!("{second} (second) wins {second_store}-{first_store}"),
        None => println!("Draw {first_store}-{second_store}"),
    }
    println!("Plies: {}", result.plies);
    if let Some(forfeit) = result.forfeit {
        println!(
            "{} forfeited by playing house {}: {}",
            forfeit.side, forfeit.house, forfeit.reason
        );
    }
    if result.truncated {
        println!("(stopped at the move limit)");
    }
}

fn run_match(
    first: AgentChoice,
    second: AgentChoice,
    depth: u8,
    nodes: Option<u64>,
    seed: u64,
    move_limit: usize,
    verbose: bool,
) -> Result<()> {
    let mut first = first.build(depth, nodes, seed);
    let mut second = second.build(depth, nodes, seed.wrapping_add(1));
    let referee = Referee::new().with_move_limit(move_limit);
    info!(first = first.name(), second = second.name(), depth, seed, "starting match");

    let result = if verbose {
        let mut stdout = io::stdout();
        let mut failed = None;
        let result = referee.play_observed(&mut first, &mut second, |view| {
            if failed.is_some() {
                return;
            }
            if let Err(e) = display::draw_board(&mut stdout, view, Side::First, "\n") {
                failed = Some(e);
                return;
            }
            println!("{}\n", display::status_line(view));
        });
        if let Some(e) = failed {
            return Err(e).context("failed to draw the board");
        }
        result
    } else {
        referee.play(&mut first, &mut second)
    };

    print_result(&result, first.name(), second.name());
    Ok(())
}

fn run_tournament_command(
    games: usize,
    depth: u8,
    nodes: Option<u64>,
    seed: u64,
    opponents: Vec<BuiltinStrategy>,
) -> Result<()> {
    let mut config = TournamentConfig {
        depth,
        nodes,
        games,
        seed,
        ..TournamentConfig::default()
    };
    if !opponents.is_empty() {
        config.opponents = opponents;
    }

    let start = Instant::now();
    let report = run_tournament(&config);
    let elapsed = start.elapsed();

    println!("Search depth {depth}, {games} games per pairing\n");
    println!(
        "{:<10} {:<7} {:>5} {:>5} {:>6} {:>7}",
        "opponent", "side", "wins", "draws", "losses", "points"
    );
    for pairing in &report.pairings {
        let tally = &pairing.tally;
        println!(
            "{:<10} {:<7} {:>5} {:>5} {:>6} {:>7}",
            pairing.opponent.to_string(),
            pairing.search_side.to_string(),
            tally.wins,
            tally.draws,
            tally.losses,
            tally.points()
        );
    }

    let total = report.total();
    println!(
        "\nTotal: {} wins, {} draws, {} losses, {}/{} points",
        total.wins,
        total.draws,
        total.losses,
        total.points(),
        report.max_points()
    );
    if total.forfeits > 0 {
        println!("Search agent forfeited {} games", total.forfeits);
    }
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_search(
    houses: Option<Vec<i32>>,
    stores: Option<Vec<i32>>,
    turn: Side,
    depth: u8,
    nodes: Option<u64>,
    verify: bool,
) -> Result<()> {
    let state = match (houses, stores) {
        (Some(houses), Some(stores)) => {
            GameState::from_parts(&houses, &stores, turn).context("invalid position")?
        }
        _ => GameState::new(),
    };
    print_board(&state)?;
    println!("Static evaluation: {}", state.evaluate());

    let mut limits = SearchLimits::depth(depth);
    if let Some(nodes) = nodes {
        limits = limits.with_nodes(nodes);
    }

    println!("\nSearching to depth {depth}...");
    let start = Instant::now();
    let result = search_with_limits(&state, limits);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(best_move) => {
            println!("\nBest move: {best_move}");
            println!("Score: {}", result.score);
            println!("Depth: {}", result.depth);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64());
            if result.stopped {
                println!("(search stopped by node limit)");
            }
        }
        None => println!("No legal moves available"),
    }

    if verify {
        let full = minimax(&state, depth);
        println!(
            "\nUnpruned: move {:?}, score {}, nodes {}",
            full.best_move, full.score, full.nodes
        );
        if (full.best_move, full.score) != (result.best_move, result.score) && !result.stopped {
            anyhow::bail!("pruned and unpruned searches disagree");
        }
    }
    Ok(())
}

fn run_perft(depth: u8, divide: bool) {
    let state = GameState::new();
    println!("Running perft({depth})...");

    if divide {
        let mut total = 0;
        for (house, count) in perft_divide(&state, depth) {
            println!("{house}: {count}");
            total += count;
        }
        println!("\nTotal: {total}");
        return;
    }

    let start = Instant::now();
    let nodes = perft(&state, depth);
    let elapsed = start.elapsed();
    println!("Nodes: {nodes}");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());

    if depth <= 6 {
        let detailed = perft_detailed(&state, depth);
        println!("Captures: {}", detailed.captures);
        println!("Game ends: {}", detailed.game_ends);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Match {
            first,
            second,
            depth,
            nodes,
            seed,
            move_limit,
            verbose,
        } => run_match(first, second, depth, nodes, seed, move_limit, verbose),
        Command::Tournament {
            games,
            depth,
            nodes,
            seed,
            opponents,
        } => run_tournament_command(games, depth, nodes, seed, opponents),
        Command::Search {
            houses,
            stores,
            turn,
            depth,
            nodes,
            verify,
        } => run_search(houses, stores, turn.into(), depth, nodes, verify),
        Command::Perft { depth, divide } => {
            run_perft(depth, divide);
            Ok(())
        }
        Command::Play { side, depth } => {
            let mut game = interactive::InteractiveGame::new(side.into(), depth);
            game.run().context("terminal error")
        }
    }
}
