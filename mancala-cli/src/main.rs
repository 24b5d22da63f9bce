//! Mancala CLI - Command-line interface
//!
//! Commands:
//! - play: Play against the AI
//! - benchmark: AI vs random simulations
//! - compare: Benchmark the AI across several depths
//! - baseline: Random vs random, first-player advantage

mod baseline;
mod benchmark;
mod compare;
mod play;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mancala_core::GameConfig;

#[derive(Parser)]
#[command(name = "mancala")]
#[command(about = "Mancala AI - play against a minimax AI or run benchmarks")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the AI
    Play(play::PlayArgs),
    /// Run AI vs random simulations
    Benchmark(benchmark::BenchmarkArgs),
    /// Compare the AI at different depths
    Compare(compare::CompareArgs),
    /// Random vs random baseline
    Baseline(baseline::BaselineArgs),
}

/// Board dimensions shared by every command
#[derive(Args, Clone, Debug)]
pub struct BoardArgs {
    /// Pits per player
    #[arg(long, short, default_value = "6", allow_hyphen_values = true)]
    pub pits: i64,

    /// Initial stones per pit
    #[arg(long, short, default_value = "4", allow_hyphen_values = true)]
    pub stones: i64,

    /// Board config JSON file (overrides --pits/--stones)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl BoardArgs {
    pub fn game_config(&self) -> Result<GameConfig> {
        match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("Failed to load board config: {}", path.display())),
            None => GameConfig::new(self.pits, self.stones).context("Invalid board dimensions"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Benchmark(args) => benchmark::run(args, cli.seed),
        Commands::Compare(args) => compare::run(args, cli.seed),
        Commands::Baseline(args) => baseline::run(args, cli.seed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_board_args_validate() {
        let args = BoardArgs {
            pits: 0,
            stones: 4,
            config: None,
        };
        assert!(args.game_config().is_err());

        let args = BoardArgs {
            pits: 4,
            stones: 3,
            config: None,
        };
        let config = args.game_config().unwrap();
        assert_eq!(config.pits_per_player(), 4);
        assert_eq!(config.stones_per_pit(), 3);
    }

    #[test]
    fn test_parse_global_seed() {
        let cli = Cli::try_parse_from(["mancala", "benchmark", "--games", "3", "--seed", "7"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(matches!(cli.command, Commands::Benchmark(ref b) if b.games == 3));
    }
}
