use anyhow::Context;
use clap::Parser;
use mcts::games::connect4::Connect4State;
use mcts::games::tictactoe::TicTacToeState;
use mcts::{GameState, Mcts, MctsConfig, SearchStatistics};
use std::fmt::Debug;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Iterations per search (default: 20,000)
    #[arg(long, default_value_t = 20_000)]
    iterations: u32,

    /// Number of searches to time per game (default: 5)
    #[arg(long, default_value_t = 5)]
    searches: u32,

    /// UCT exploration constant (default: 1.414)
    #[arg(long, default_value_t = 1.414)]
    exploration: f64,

    /// Seed for the random stream (default: 42)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("UCT MCTS - Benchmark Tool");
    println!("=========================");
    println!("Iterations per search: {}", args.iterations);
    println!("Searches per game: {}", args.searches);
    println!("Exploration constant: {}", args.exploration);
    println!("Seed: {}", args.seed);
    println!("-------------------------");

    #[cfg(debug_assertions)]
    println!(
        "WARNING: Running in debug mode. Performance will be significantly lower.\n\
         Use --release for accurate benchmarks.\n"
    );

    let config = MctsConfig::default()
        .with_iterations(args.iterations)
        .with_exploration_constant(args.exploration)
        .with_seed(args.seed);

    bench("Tic-tac-toe", &TicTacToeState::new(), &config, args.searches)?;
    bench("Connect 4 (7x6)", &Connect4State::default(), &config, args.searches)?;
    Ok(())
}

fn bench<S: GameState>(
    name: &str,
    state: &S,
    config: &MctsConfig,
    searches: u32,
) -> anyhow::Result<()> {
    println!("\nRunning {} benchmark...", name);
    let mut engine = Mcts::new(config.clone()).context("invalid benchmark configuration")?;

    let start = Instant::now();
    let mut last = None;
    for _ in 0..searches {
        last = Some(engine.search_with_stats(state)?);
    }
    let duration = start.elapsed();

    if let Some(outcome) = last {
        println!("Best move: {:?}", outcome.best_move);
        print_stats(name, &outcome.stats, duration, searches);
    }
    Ok(())
}

fn print_stats<M: Debug>(
    name: &str,
    stats: &SearchStatistics<M>,
    duration: Duration,
    searches: u32,
) {
    let total_iterations = stats.iterations as f64 * searches as f64;
    let secs = duration.as_secs_f64().max(f64::EPSILON);

    println!("{} Results:", name);
    println!("  Total Time: {:.2}s", duration.as_secs_f64());
    println!("  Iterations/sec: {:.0}", total_iterations / secs);
    println!("  Nodes in last tree: {}", stats.tree.total_nodes);
    println!("  Max depth: {}", stats.tree.max_depth);
    println!("  Root value (P1 score): {:.3}", stats.tree.root_value);
    println!("  Root children:");
    for child in &stats.root_children {
        println!(
            "    {:?}: {} visits, {:.3} mean",
            child.mv,
            child.visits,
            child.wins / child.visits.max(1) as f64
        );
    }
}
