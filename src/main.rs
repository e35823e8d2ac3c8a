//! # UCT MCTS Self-Play
//!
//! Plays a game of tic-tac-toe or Connect 4 with the MCTS engine choosing
//! the moves for both sides, printing the board after every ply and the
//! result at the end.
//!
//! ## Usage
//! Run with `cargo run --release -- --game tictactoe --iterations 2000`.
//! Set `RUST_LOG=mcts=debug` to see per-search statistics.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use mcts::games::connect4::Connect4State;
use mcts::games::tictactoe::TicTacToeState;
use mcts::{
    play_self_play, GameController, GameState, GameStatus, Mcts, MctsConfig, Player,
    RewardPerspective,
};
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Games the driver can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Tictactoe,
    Connect4,
}

/// Reward conventions selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Perspective {
    /// Every node scores player one's result
    PlayerOne,
    /// Every node scores the result of the player who moved into it
    JustMoved,
}

impl From<Perspective> for RewardPerspective {
    fn from(p: Perspective) -> Self {
        match p {
            Perspective::PlayerOne => RewardPerspective::PlayerOne,
            Perspective::JustMoved => RewardPerspective::PlayerJustMoved,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game to play
    #[arg(short, long, value_enum, default_value_t = GameKind::Tictactoe)]
    game: GameKind,

    /// MCTS iterations per move
    #[arg(short, long, default_value_t = 2000)]
    iterations: u32,

    /// UCT exploration constant
    #[arg(short, long, default_value_t = 1.4)]
    exploration: f64,

    /// Seed for a reproducible game (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reward convention used during backpropagation
    #[arg(long, value_enum, default_value_t = Perspective::PlayerOne)]
    perspective: Perspective,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Colors X and O in the plain-text board rendering
fn colorize_board(board: &str) -> String {
    board
        .chars()
        .map(|ch| match ch {
            'X' => "X".red().bold().to_string(),
            'O' => "O".blue().bold().to_string(),
            other => other.to_string(),
        })
        .collect()
}

fn run<S>(initial_state: S, engine: &mut Mcts) -> anyhow::Result<()>
where
    S: GameState + fmt::Display,
    S::Move: fmt::Display,
{
    println!("{}", colorize_board(&initial_state.to_string()));

    let controller: GameController<S> = play_self_play(initial_state, engine, |controller| {
        if let Some(entry) = controller.get_last_move() {
            println!(
                "{}. {} plays {}",
                entry.move_number,
                player_label(entry.player),
                entry.move_made
            );
        }
        println!("{}", colorize_board(&controller.get_render_state().to_string()));
    })
    .context("self-play search failed")?;

    let result = match controller.get_status() {
        GameStatus::Win(player) => format!("{} wins", player_label(player)),
        GameStatus::Draw => "Draw".to_string(),
        GameStatus::InProgress => "Stopped before the game ended".to_string(),
    };
    println!("{}", result.bold());
    Ok(())
}

fn player_label(player: Player) -> String {
    match player {
        Player::One => format!("{} (X)", player),
        Player::Two => format!("{} (O)", player),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let mut config = MctsConfig::default()
        .with_iterations(args.iterations)
        .with_exploration_constant(args.exploration)
        .with_reward_perspective(args.perspective.into());
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    let mut engine = Mcts::new(config).context("invalid search configuration")?;

    match args.game {
        GameKind::Tictactoe => run(TicTacToeState::new(), &mut engine),
        GameKind::Connect4 => run(Connect4State::default(), &mut engine),
    }
}
