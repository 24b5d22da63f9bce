//! Compare command - benchmark alpha-beta across several depths

use anyhow::{bail, Result};
use clap::Args;

use mancala_core::{AiConfig, GameConfig};

use crate::benchmark::{run_ai_vs_random, BenchmarkSummary, JsonSummary};
use crate::BoardArgs;

#[derive(Args)]
pub struct CompareArgs {
    /// Depths to compare
    #[arg(long, short, num_args = 1.., default_values_t = vec![2, 5, 8])]
    pub depths: Vec<u32>,

    /// Games per depth
    #[arg(long, short = 'n', default_value = "50")]
    pub games: usize,

    #[command(flatten)]
    pub board: BoardArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run compare command
pub fn run(args: CompareArgs, seed: Option<u64>) -> Result<()> {
    if args.depths.is_empty() {
        bail!("at least one depth is required");
    }
    let config = args.board.game_config()?;

    tracing::info!(
        "Comparing depths {:?} over {} games each",
        args.depths,
        args.games
    );

    let results = compare_depths(&config, &args.depths, args.games, seed, !args.json)?;

    if args.json {
        let output: Vec<JsonSummary> = results.iter().map(JsonSummary::from).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&results);
    }

    Ok(())
}

/// Every depth replays the same seeded opponent
fn compare_depths(
    config: &GameConfig,
    depths: &[u32],
    games: usize,
    seed: Option<u64>,
    show_progress: bool,
) -> Result<Vec<BenchmarkSummary>> {
    let mut results = Vec::with_capacity(depths.len());

    for &depth in depths {
        let mut ai = AiConfig::alpha_beta(depth);
        ai.seed = seed;

        let summary = run_ai_vs_random(config, &ai, games, show_progress)?;
        tracing::info!(
            "Depth {}: win rate {:.1}%, avg move time {:.3}s",
            depth,
            summary.ai_win_rate(),
            summary.avg_ai_move_time.as_secs_f64()
        );
        results.push(summary);
    }

    Ok(results)
}

fn print_summary(results: &[BenchmarkSummary]) {
    println!("\n{}", "=".repeat(60));
    println!("  SUMMARY");
    println!("{}", "=".repeat(60));
    println!(
        "  {:<8} {:<12} {:<15} {:<12} {:<12}",
        "Depth", "Win Rate", "Avg Move Time", "Avg Nodes", "Total Time"
    );
    println!("  {}", "-".repeat(58));
    for r in results {
        println!(
            "  {:<8} {:>6.1}%      {:>8.3}s      {:>10.0}   {:>8.1}s",
            r.depth,
            r.ai_win_rate(),
            r.avg_ai_move_time.as_secs_f64(),
            r.avg_nodes,
            r.total_time.as_secs_f64()
        );
    }
    println!();
}
