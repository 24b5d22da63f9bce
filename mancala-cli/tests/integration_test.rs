//! Integration tests for the Mancala engine
//!
//! Tests the full stack: board rules, game flow, search and AI play

use mancala_core::{
    alpha_beta_search, choose_move, minimax_search, new_game, Board, GameConfig, GameError,
    GameState, Mancala, Outcome, Player, SearchAlgorithm, SearchPlayer,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn standard_game() -> GameState {
    new_game(6, 4).unwrap()
}

fn position(pits: usize, cells: Vec<u32>, to_move: Player) -> GameState {
    GameState::from_board(Board::from_cells(pits, cells).unwrap(), to_move)
}

/// Play a seeded random game, checking conservation after every move
fn random_self_play(pits: i64, stones: i64, seed: u64) -> (GameState, usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = new_game(pits, stones).unwrap();
    let total = state.board().total_stones();
    let mut moves = 0;

    while let Some(pit) = state.random_move(&mut rng) {
        assert!(state.is_legal(pit));
        state.apply(pit).unwrap();
        assert_eq!(state.board().total_stones(), total, "stones lost after move {}", moves);
        moves += 1;
    }

    (state, moves)
}

// ============================================================================
// GAME LOGIC TESTS
// ============================================================================

#[test]
fn test_random_self_play_terminates_and_conserves() {
    for seed in 0..50 {
        let (state, moves) = random_self_play(6, 4, seed);
        assert!(state.is_terminal());
        assert!(moves > 0);
        // Every move banks or moves at least one stone forward, so games stay short
        assert!(moves < 1000, "seed {} took {} moves", seed, moves);
    }
}

#[test]
fn test_winner_agrees_with_stores() {
    for seed in 0..50 {
        let (state, _) = random_self_play(5, 3, seed);
        let one = state.score(Player::One);
        let two = state.score(Player::Two);
        let expected = if one > two {
            Outcome::Win(Player::One)
        } else if two > one {
            Outcome::Win(Player::Two)
        } else {
            Outcome::Tie
        };
        assert_eq!(state.winner(), Some(expected));
        assert_eq!(one + two, 30);
    }
}

#[test]
fn test_sweep_empties_every_pit() {
    for seed in 100..130 {
        let (state, _) = random_self_play(6, 4, seed);
        for player in [Player::One, Player::Two] {
            assert!(state.board().side(player).iter().all(|&s| s == 0));
        }
    }
}

#[test]
fn test_sweep_when_only_opponent_side_empties() {
    // Player one captures player two's last stones and still holds 4
    let mut game = position(3, vec![1, 0, 4, 0, 0, 3, 0, 0], Player::One);
    let report = game.apply(1).unwrap();
    assert_eq!(report.captured, 4);
    assert!(report.finished);
    assert_eq!(game.board().cells(), &[0, 0, 0, 8, 0, 0, 0, 0]);
    assert_eq!(game.winner(), Some(Outcome::Win(Player::One)));
    assert_eq!(choose_move(&game, 3, SearchAlgorithm::AlphaBeta), None);
}

#[test]
fn test_extra_turn_from_start() {
    let mut game = standard_game();
    let report = game.apply(3).unwrap();
    assert!(report.extra_turn);
    assert_eq!(report.landing, 6);
    assert_eq!(game.current_player(), Player::One);
}

#[test]
fn test_capture_scenario() {
    let mut game = position(
        6,
        vec![0, 0, 1, 0, 4, 4, 0, 4, 4, 4, 4, 4, 4, 0],
        Player::One,
    );
    let report = game.apply(3).unwrap();
    assert_eq!(report.captured, 5);
    assert_eq!(game.board().get(3), 0);
    assert_eq!(game.board().get(9), 0);
    assert_eq!(game.score(Player::One), 5);
}

#[test]
fn test_errors_surface() {
    let mut game = standard_game();
    assert!(matches!(game.apply(0), Err(GameError::InvalidMove { pit: 0 })));
    assert!(matches!(game.apply(7), Err(GameError::InvalidMove { pit: 7 })));
    assert!(matches!(new_game(0, 4), Err(GameError::InvalidConfiguration { .. })));
    assert!(matches!(new_game(6, -1), Err(GameError::InvalidConfiguration { .. })));

    let mut done = position(2, vec![0, 0, 4, 1, 1, 2], Player::Two);
    assert!(matches!(done.apply(1), Err(GameError::GameOver)));
}

#[test]
fn test_single_pit_games() {
    for stones in 1..6 {
        let game = new_game(1, stones).unwrap();
        assert_eq!(game.legal_moves(), vec![1]);
        let (state, _) = SearchPlayer::new(4, SearchAlgorithm::AlphaBeta).play_game(game, 10);
        assert!(state.is_terminal());
        assert_eq!(state.board().total_stones(), 2 * stones as u64);
    }
}

// ============================================================================
// SEARCH TESTS
// ============================================================================

#[test]
fn test_minimax_and_alpha_beta_agree_on_standard_board() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut state = standard_game();

    for _ in 0..12 {
        if state.is_terminal() {
            break;
        }
        let mm = minimax_search::<Mancala>(&state, 3);
        let ab = alpha_beta_search::<Mancala>(&state, 3);
        assert_eq!(mm.value, ab.value);
        assert_eq!(mm.best_move, ab.best_move);
        assert!(ab.nodes <= mm.nodes);

        let Some(pit) = state.random_move(&mut rng) else {
            break;
        };
        state.apply(pit).unwrap();
    }
}

#[test]
fn test_choose_move_on_finished_game() {
    let game = position(3, vec![0, 0, 0, 12, 0, 0, 0, 12], Player::One);
    assert_eq!(choose_move(&game, 5, SearchAlgorithm::AlphaBeta), None);
}

#[test]
fn test_alpha_beta_prunes() {
    let game = standard_game();
    let mm = minimax_search::<Mancala>(&game, 5);
    let ab = alpha_beta_search::<Mancala>(&game, 5);
    assert!(ab.nodes < mm.nodes, "alpha-beta {} vs minimax {}", ab.nodes, mm.nodes);
}

// ============================================================================
// AI VS RANDOM TESTS
// ============================================================================

#[test]
fn test_ai_beats_random_player() {
    let ai = SearchPlayer::new(4, SearchAlgorithm::AlphaBeta);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut ai_wins = 0;
    let games = 10;

    for _ in 0..games {
        let mut state = GameState::new(&GameConfig::default());
        while !state.is_terminal() {
            let pit = match state.current_player() {
                Player::One => ai.best_move(&state),
                Player::Two => state.random_move(&mut rng),
            };
            state.apply(pit.unwrap()).unwrap();
        }
        if state.winner() == Some(Outcome::Win(Player::One)) {
            ai_wins += 1;
        }
    }

    println!("AI won {}/{} games against random", ai_wins, games);
    assert!(ai_wins >= 7);
}

#[test]
fn test_search_performance() {
    let game = standard_game();

    let start = Instant::now();
    let result = alpha_beta_search::<Mancala>(&game, 6);
    let elapsed = start.elapsed();

    println!("Alpha-beta depth 6: {} nodes in {:?}", result.nodes, elapsed);
    assert!(result.best_move.is_some());
    assert!(elapsed.as_secs() < 30, "Depth 6 took too long");
}
