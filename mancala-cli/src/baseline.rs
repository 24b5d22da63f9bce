//! Baseline command - random vs random, to measure first-player advantage

use anyhow::{Context, Result};
use clap::Args;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use mancala_core::{GameConfig, GameState, Outcome, Player};

use crate::benchmark::{create_progress_bar, create_rng, percent};
use crate::BoardArgs;

#[derive(Args)]
pub struct BaselineArgs {
    /// Number of games to simulate
    #[arg(long, short = 'n', default_value = "1000")]
    pub games: usize,

    #[command(flatten)]
    pub board: BoardArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct BaselineResults {
    num_games: usize,
    p1_wins: usize,
    p2_wins: usize,
    ties: usize,
    p1_win_rate: f64,
    p2_win_rate: f64,
    tie_rate: f64,
    avg_moves: f64,
}

/// Run baseline command
pub fn run(args: BaselineArgs, seed: Option<u64>) -> Result<()> {
    let config = args.board.game_config()?;
    tracing::info!("Running random vs random baseline: {} games", args.games);

    let mut rng = create_rng(seed);
    let progress = create_progress_bar(args.games as u64, !args.json)?;

    let mut outcomes = Vec::with_capacity(args.games);
    for _ in 0..args.games {
        outcomes.push(play_random_game(&config, &mut rng)?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let results = summarize(&outcomes);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_text_results(&results);
    }
    Ok(())
}

/// Both sides pick uniformly among legal moves
fn play_random_game(config: &GameConfig, rng: &mut ChaCha8Rng) -> Result<(Outcome, usize)> {
    let mut state = GameState::new(config);
    let mut moves = 0;

    while let Some(pit) = state.random_move(rng) {
        state.apply(pit)?;
        moves += 1;
    }

    let outcome = state.winner().context("random game ended early")?;
    Ok((outcome, moves))
}

fn summarize(outcomes: &[(Outcome, usize)]) -> BaselineResults {
    let n = outcomes.len();
    let count = |o: Outcome| outcomes.iter().filter(|(x, _)| *x == o).count();
    let p1_wins = count(Outcome::Win(Player::One));
    let p2_wins = count(Outcome::Win(Player::Two));
    let ties = count(Outcome::Tie);
    let total_moves: usize = outcomes.iter().map(|(_, m)| m).sum();

    BaselineResults {
        num_games: n,
        p1_wins,
        p2_wins,
        ties,
        p1_win_rate: percent(p1_wins, n),
        p2_win_rate: percent(p2_wins, n),
        tie_rate: percent(ties, n),
        avg_moves: if n == 0 { 0.0 } else { total_moves as f64 / n as f64 },
    }
}

fn print_text_results(r: &BaselineResults) {
    println!("\n=== Random vs Random Baseline ===");
    println!("Games:       {}", r.num_games);
    println!("P1 wins:     {} ({:.1}%)", r.p1_wins, r.p1_win_rate);
    println!("P2 wins:     {} ({:.1}%)", r.p2_wins, r.p2_win_rate);
    println!("Ties:        {} ({:.1}%)", r.ties, r.tie_rate);
    println!("Avg moves:   {:.1}", r.avg_moves);
    println!(
        "First-player advantage: {:+.1} points",
        r.p1_win_rate - r.p2_win_rate
    );
}
