//! Play command - human vs AI at the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_session()
//! - Level 3: read_human_move(), ai_move(), announce_extra_turn(), print_game_over()
//! - Level 4: banner formatting

use std::io::{self, BufRead, Lines, Write};
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use mancala_core::{AiConfig, GameConfig, GameState, Outcome, Player, SearchAlgorithm, SearchPlayer};

use crate::BoardArgs;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// AI search depth in plies
    #[arg(long, short, default_value = "6")]
    pub depth: u32,

    /// Let the AI move first
    #[arg(long)]
    pub ai_first: bool,

    /// Use basic minimax instead of alpha-beta pruning
    #[arg(long)]
    pub no_pruning: bool,

    #[command(flatten)]
    pub board: BoardArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    let config = args.board.game_config()?;
    let ai = AiConfig {
        depth: args.depth,
        algorithm: if args.no_pruning {
            SearchAlgorithm::Minimax
        } else {
            SearchAlgorithm::AlphaBeta
        },
        seed: None,
    };
    let human = if args.ai_first { Player::Two } else { Player::One };

    tracing::debug!(
        "Starting game: {} pits, {} stones, depth {}",
        config.pits_per_player(),
        config.stones_per_pit(),
        ai.depth
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play_session(&config, &ai, human, stdin.lock(), &mut stdout)?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - GAME LOOP
// ============================================================================

/// Play one game, returning the final state or None if the human quit
fn play_session<R: BufRead, W: Write>(
    config: &GameConfig,
    ai_config: &AiConfig,
    human: Player,
    input: R,
    out: &mut W,
) -> Result<Option<GameState>> {
    let ai = SearchPlayer::from_config(ai_config);
    let mut state = GameState::new(config);
    let mut lines = input.lines();

    print_banner(out, ai_config, human, config.pits_per_player())?;

    while !state.is_terminal() {
        writeln!(out, "{}\n", state)?;

        let mover = state.current_player();
        let pit = if mover == human {
            match read_human_move(&state, &mut lines, out)? {
                Some(pit) => pit,
                None => {
                    writeln!(out, "\nGame abandoned.")?;
                    return Ok(None);
                }
            }
        } else {
            match ai_move(&state, &ai, out)? {
                Some(pit) => pit,
                None => break,
            }
        };

        let report = state.apply(pit)?;
        if report.extra_turn {
            announce_extra_turn(out, mover == human)?;
        }
    }

    print_game_over(out, &state, human)?;
    Ok(Some(state))
}

// ============================================================================
// LEVEL 3 - TURNS
// ============================================================================

/// Prompt until a legal pit is entered. None on `q` or end of input.
fn read_human_move<R: BufRead, W: Write>(
    state: &GameState,
    lines: &mut Lines<R>,
    out: &mut W,
) -> Result<Option<usize>> {
    let moves = state.legal_moves();
    writeln!(out, "Your valid moves: {:?}", moves)?;

    loop {
        write!(out, "Your move: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let input = line.trim().to_lowercase();
        if input == "q" {
            return Ok(None);
        }

        match input.parse::<usize>() {
            Ok(pit) if state.is_legal(pit) => return Ok(Some(pit)),
            Ok(_) => writeln!(out, "Invalid move. Choose from: {:?}", moves)?,
            Err(_) => writeln!(out, "Please enter a valid pit number.")?,
        }
    }
}

fn ai_move<W: Write>(state: &GameState, ai: &SearchPlayer, out: &mut W) -> Result<Option<usize>> {
    writeln!(out, "AI is thinking...")?;
    let start = Instant::now();
    let result = ai.search(state);
    let elapsed = start.elapsed();

    tracing::debug!(
        "AI searched {} nodes in {:?}, value {}",
        result.nodes,
        elapsed,
        result.value
    );

    if let Some(pit) = result.best_move {
        writeln!(out, "AI plays pit {} (took {:.2}s)\n", pit, elapsed.as_secs_f64())?;
    }
    Ok(result.best_move)
}

fn announce_extra_turn<W: Write>(out: &mut W, human_moved: bool) -> io::Result<()> {
    if human_moved {
        writeln!(out, "★ EXTRA TURN! Your last stone landed in your mancala. Go again!")
    } else {
        writeln!(out, "★ EXTRA TURN! AI's last stone landed in its mancala.")
    }
}

fn print_game_over<W: Write>(out: &mut W, state: &GameState, human: Player) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "                  GAME OVER")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "{}", state)?;
    writeln!(
        out,
        "\nFinal Score: Player 1: {} | Player 2: {}",
        state.score(Player::One),
        state.score(Player::Two)
    )?;

    match state.winner() {
        Some(Outcome::Tie) => writeln!(out, "It's a tie!"),
        Some(Outcome::Win(player)) if player == human => writeln!(out, "Congratulations! You win!"),
        Some(Outcome::Win(_)) => writeln!(out, "AI wins. Better luck next time!"),
        None => Ok(()),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn print_banner<W: Write>(out: &mut W, ai: &AiConfig, human: Player, pits: usize) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "   MANCALA - Human vs AI ({}, Depth {})", ai.algorithm, ai.depth)?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "\nYou are {}", human)?;
    writeln!(out, "Enter pit number (1-{}) to make a move.", pits)?;
    writeln!(out, "Enter 'q' to quit.\n")
}

// ============================================================================
// TESTS
// ============================================================================
