//! Engine-vs-engine matches from the start position.
//!
//! Prints the JSON statistics to stdout (or writes them with `--output`).

use chess_bot::player::ai::{AIConfig, Difficulty};
use chess_bot::selfplay::{run_selfplay, SelfPlayConfig};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "selfplay", about = "Pit two difficulty levels against each other")]
struct Args {
    /// Number of games; colors alternate between games
    #[arg(short = 'n', long, default_value_t = 10)]
    games: usize,

    /// First engine: beginner, intermediate, advanced or expert
    #[arg(long, default_value = "intermediate")]
    ai1: String,

    /// Second engine
    #[arg(long, default_value = "beginner")]
    ai2: String,

    /// Plies after which a game is scored as a draw
    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the statistics to this file instead of stdout
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,
}

fn difficulty(name: &str) -> Difficulty {
    name.parse().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to intermediate");
        Difficulty::default()
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SelfPlayConfig {
        num_games: args.games,
        ai1: difficulty(&args.ai1),
        ai2: difficulty(&args.ai2),
        max_plies: args.max_plies,
        seed: args.seed,
        engine: AIConfig::get().clone(),
    };

    info!(games = config.num_games, ai1 = %config.ai1, ai2 = %config.ai2, "starting self-play");
    let stats = run_selfplay(&config)?;
    info!(
        ai1_wins = stats.ai1_wins,
        ai2_wins = stats.ai2_wins,
        draws = stats.draws,
        avg_plies = stats.avg_plies,
        "self-play finished"
    );

    let json = serde_json::to_string_pretty(&stats)?;
    match args.output {
        Some(path) => std::fs::write(&path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}
