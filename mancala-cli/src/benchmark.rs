//! Benchmark command - AI (player one) vs a seeded random player
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_ai_vs_random(), report_results()
//! - Level 3: play_ai_vs_random(), compute_statistics()
//! - Level 4: rng, progress bar, formatting

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use mancala_core::{AiConfig, GameConfig, GameState, Outcome, Player, SearchAlgorithm, SearchPlayer};

use crate::BoardArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Number of games to simulate
    #[arg(long, short = 'n', default_value = "100")]
    pub games: usize,

    /// AI search depth in plies
    #[arg(long, short, default_value = "5")]
    pub depth: u32,

    /// Use basic minimax instead of alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,

    #[command(flatten)]
    pub board: BoardArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// One finished AI vs random game
#[derive(Clone, Debug)]
pub(crate) struct GameRecord {
    pub outcome: Outcome,
    pub moves: usize,
    pub duration: Duration,
    pub ai_move_times: Vec<Duration>,
    pub nodes: u64,
}

/// Aggregated benchmark results
#[derive(Clone, Debug)]
pub(crate) struct BenchmarkSummary {
    pub algorithm: SearchAlgorithm,
    pub depth: u32,
    pub games: usize,
    pub ai_wins: usize,
    pub random_wins: usize,
    pub ties: usize,
    pub avg_moves: f64,
    pub avg_game_time: Duration,
    pub avg_ai_move_time: Duration,
    pub avg_nodes: f64,
    pub total_time: Duration,
}

impl BenchmarkSummary {
    pub fn ai_win_rate(&self) -> f64 {
        percent(self.ai_wins, self.games)
    }

    pub fn random_win_rate(&self) -> f64 {
        percent(self.random_wins, self.games)
    }

    pub fn tie_rate(&self) -> f64 {
        percent(self.ties, self.games)
    }
}

/// Serialized form of [`BenchmarkSummary`]
#[derive(Serialize)]
pub(crate) struct JsonSummary {
    algorithm: SearchAlgorithm,
    depth: u32,
    num_games: usize,
    ai_wins: usize,
    random_wins: usize,
    ties: usize,
    ai_win_rate: f64,
    random_win_rate: f64,
    tie_rate: f64,
    avg_moves_per_game: f64,
    avg_game_time_secs: f64,
    avg_ai_move_time_secs: f64,
    avg_nodes_per_ai_move: f64,
    total_time_secs: f64,
}

impl From<&BenchmarkSummary> for JsonSummary {
    fn from(s: &BenchmarkSummary) -> Self {
        Self {
            algorithm: s.algorithm,
            depth: s.depth,
            num_games: s.games,
            ai_wins: s.ai_wins,
            random_wins: s.random_wins,
            ties: s.ties,
            ai_win_rate: s.ai_win_rate(),
            random_win_rate: s.random_win_rate(),
            tie_rate: s.tie_rate(),
            avg_moves_per_game: s.avg_moves,
            avg_game_time_secs: s.avg_game_time.as_secs_f64(),
            avg_ai_move_time_secs: s.avg_ai_move_time.as_secs_f64(),
            avg_nodes_per_ai_move: s.avg_nodes,
            total_time_secs: s.total_time.as_secs_f64(),
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Resolve board and AI settings
/// 2. Play the AI against a random opponent
/// 3. Report results
pub fn run(args: BenchmarkArgs, seed: Option<u64>) -> Result<()> {
    let config = args.board.game_config()?;
    let ai = AiConfig {
        depth: args.depth,
        algorithm: if args.no_pruning {
            SearchAlgorithm::Minimax
        } else {
            SearchAlgorithm::AlphaBeta
        },
        seed,
    };

    tracing::info!(
        "Starting benchmark: {} games, {} at depth {}",
        args.games,
        ai.algorithm,
        ai.depth
    );

    let summary = run_ai_vs_random(&config, &ai, args.games, !args.json)?;

    report_results(&summary, &config, seed, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play `games` seeded games and aggregate them
pub(crate) fn run_ai_vs_random(
    config: &GameConfig,
    ai: &AiConfig,
    games: usize,
    show_progress: bool,
) -> Result<BenchmarkSummary> {
    let player = SearchPlayer::from_config(ai);
    let mut rng = create_rng(ai.seed);
    let progress = create_progress_bar(games as u64, show_progress)?;

    let mut records = Vec::with_capacity(games);
    for game_num in 0..games {
        let record = play_ai_vs_random(config, &player, &mut rng)?;
        tracing::debug!(
            "Game {}: {:?} in {} moves ({} nodes)",
            game_num + 1,
            record.outcome,
            record.moves,
            record.nodes
        );
        records.push(record);
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(compute_statistics(ai, &records))
}

fn report_results(
    summary: &BenchmarkSummary,
    config: &GameConfig,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    if json {
        let output = serde_json::to_string_pretty(&JsonSummary::from(summary))?;
        println!("{}", output);
    } else {
        print_text_results(summary, config, seed);
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// AI moves for player one, the random player for player two
fn play_ai_vs_random(
    config: &GameConfig,
    player: &SearchPlayer,
    rng: &mut ChaCha8Rng,
) -> Result<GameRecord> {
    let mut state = GameState::new(config);
    let mut moves = 0;
    let mut ai_move_times = Vec::new();
    let mut nodes = 0;
    let start = Instant::now();

    while !state.is_terminal() {
        let pit = match state.current_player() {
            Player::One => {
                let move_start = Instant::now();
                let result = player.search(&state);
                ai_move_times.push(move_start.elapsed());
                nodes += result.nodes;
                result.best_move
            }
            Player::Two => state.random_move(rng),
        };

        let Some(pit) = pit else {
            break;
        };
        state.apply(pit)?;
        moves += 1;
    }

    let outcome = state
        .winner()
        .context("game stopped before reaching a final position")?;

    Ok(GameRecord {
        outcome,
        moves,
        duration: start.elapsed(),
        ai_move_times,
        nodes,
    })
}

/// Compute aggregate statistics from game records
pub(crate) fn compute_statistics(ai: &AiConfig, records: &[GameRecord]) -> BenchmarkSummary {
    let count = |outcome: Outcome| records.iter().filter(|r| r.outcome == outcome).count();

    let total_time: Duration = records.iter().map(|r| r.duration).sum();
    let total_moves: usize = records.iter().map(|r| r.moves).sum();
    let ai_times: Vec<Duration> = records
        .iter()
        .flat_map(|r| r.ai_move_times.iter().copied())
        .collect();
    let total_nodes: u64 = records.iter().map(|r| r.nodes).sum();

    BenchmarkSummary {
        algorithm: ai.algorithm,
        depth: ai.depth,
        games: records.len(),
        ai_wins: count(Outcome::Win(Player::One)),
        random_wins: count(Outcome::Win(Player::Two)),
        ties: count(Outcome::Tie),
        avg_moves: mean(total_moves as f64, records.len()),
        avg_game_time: average_duration(total_time, records.len()),
        avg_ai_move_time: average_duration(ai_times.iter().sum(), ai_times.len()),
        avg_nodes: mean(total_nodes as f64, ai_times.len()),
        total_time,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub(crate) fn create_progress_bar(len: u64, visible: bool) -> Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} games [{elapsed_precise}]")?
            .progress_chars("=>-"),
    );
    Ok(bar)
}

/// `count` as a percentage of `total`
pub(crate) fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn average_duration(total: Duration, n: usize) -> Duration {
    match u32::try_from(n) {
        Ok(0) => Duration::ZERO,
        Ok(n) => total / n,
        Err(_) => Duration::from_secs_f64(total.as_secs_f64() / n as f64),
    }
}

fn print_text_results(s: &BenchmarkSummary, config: &GameConfig, seed: Option<u64>) {
    println!("\n{}", "=".repeat(60));
    println!(
        "  Mancala Benchmark: AI ({}, Depth {}) vs Random",
        s.algorithm, s.depth
    );
    println!("{}", "=".repeat(60));
    println!("  Simulations: {}", s.games);
    println!(
        "  Board: {} pits, {} stones each",
        config.pits_per_player(),
        config.stones_per_pit()
    );
    if let Some(seed) = seed {
        println!("  Random seed: {}", seed);
    }

    println!("\n  Results:");
    println!("  {}", "-".repeat(40));
    println!("  AI Wins:       {:4} ({:.1}%)", s.ai_wins, s.ai_win_rate());
    println!("  Random Wins:   {:4} ({:.1}%)", s.random_wins, s.random_win_rate());
    println!("  Ties:          {:4} ({:.1}%)", s.ties, s.tie_rate());
    println!("  {}", "-".repeat(40));
    println!("  Avg moves/game:    {:.1}", s.avg_moves);
    println!("  Avg game time:     {:.3}s", s.avg_game_time.as_secs_f64());
    println!("  Avg AI move time:  {:.3}s", s.avg_ai_move_time.as_secs_f64());
    println!("  Avg nodes/move:    {:.0}", s.avg_nodes);
    println!("  Total time:        {:.1}s", s.total_time.as_secs_f64());
    println!();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: Outcome, moves: usize, ai_moves: u64, nodes: u64) -> GameRecord {
        GameRecord {
            outcome,
            moves,
            duration: Duration::from_millis(10),
            ai_move_times: vec![Duration::from_millis(2); ai_moves as usize],
            nodes,
        }
    }

    #[test]
    fn test_compute_statistics_empty() {
        let summary = compute_statistics(&AiConfig::alpha_beta(3), &[]);
        assert_eq!(summary.games, 0);
        assert_eq!(summary.ai_win_rate(), 0.0);
        assert_eq!(summary.avg_moves, 0.0);
        assert_eq!(summary.avg_ai_move_time, Duration::ZERO);
    }

    #[test]
    fn test_compute_statistics() {
        let records = vec![
            record(Outcome::Win(Player::One), 20, 10, 500),
            record(Outcome::Win(Player::One), 30, 10, 700),
            record(Outcome::Win(Player::Two), 25, 10, 600),
            record(Outcome::Tie, 25, 10, 600),
        ];
        let summary = compute_statistics(&AiConfig::minimax(4), &records);

        assert_eq!(summary.algorithm, SearchAlgorithm::Minimax);
        assert_eq!(summary.depth, 4);
        assert_eq!(summary.ai_wins, 2);
        assert_eq!(summary.random_wins, 1);
        assert_eq!(summary.ties, 1);
        assert_eq!(summary.ai_win_rate(), 50.0);
        assert_eq!(summary.tie_rate(), 25.0);
        assert_eq!(summary.avg_moves, 25.0);
        assert_eq!(summary.avg_nodes, 60.0);
        assert_eq!(summary.avg_ai_move_time, Duration::from_millis(2));
        assert_eq!(summary.total_time, Duration::from_millis(40));
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = GameConfig::new(4, 3).unwrap();
        let ai = AiConfig::alpha_beta(2).with_seed(5);
        let a = run_ai_vs_random(&config, &ai, 5, false).unwrap();
        let b = run_ai_vs_random(&config, &ai, 5, false).unwrap();
        assert_eq!(a.games, 5);
        assert_eq!(a.ai_wins + a.random_wins + a.ties, 5);
        assert_eq!((a.ai_wins, a.random_wins, a.ties), (b.ai_wins, b.random_wins, b.ties));
        assert_eq!(a.avg_moves, b.avg_moves);
        assert_eq!(a.avg_nodes, b.avg_nodes);
    }

    #[test]
    fn test_json_summary_fields() {
        let summary = compute_statistics(
            &AiConfig::alpha_beta(3),
            &[record(Outcome::Win(Player::One), 12, 6, 60)],
        );
        let value = serde_json::to_value(JsonSummary::from(&summary)).unwrap();
        assert_eq!(value["algorithm"], "AlphaBeta");
        assert_eq!(value["ai_wins"], 1);
        assert_eq!(value["ai_win_rate"], 100.0);
        assert_eq!(value["avg_nodes_per_ai_move"], 10.0);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }

    #[test]
    fn test_average_duration() {
        assert_eq!(average_duration(Duration::from_millis(90), 0), Duration::ZERO);
        assert_eq!(average_duration(Duration::from_millis(90), 3), Duration::from_millis(30));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_average_duration_past_u32() {
        let n = u32::MAX as usize + 1;
        let avg = average_duration(Duration::from_secs(2 * n as u64), n);
        assert!((avg.as_secs_f64() - 2.0).abs() < 1e-6, "got {:?}", avg);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
