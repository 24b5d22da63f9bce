//! Search-based Mancala player

use crate::config::AiConfig;
use crate::eval::{Mancala, StoreDifference};
use crate::game::GameState;
use crate::search::{search, DepthCutoff, Evaluator, SearchAlgorithm, SearchResult};

/// Best pit for the side to move, or None when there is nothing to play
pub fn choose_move(state: &GameState, depth: u32, algorithm: SearchAlgorithm) -> Option<usize> {
    SearchPlayer::new(depth, algorithm).best_move(state)
}

/// Depth-limited searcher with a pluggable evaluation
pub struct SearchPlayer<E = StoreDifference> {
    pub depth: u32,
    pub algorithm: SearchAlgorithm,
    evaluator: E,
}

impl SearchPlayer {
    pub fn new(depth: u32, algorithm: SearchAlgorithm) -> Self {
        Self::with_evaluator(depth, algorithm, StoreDifference)
    }

    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config.depth, config.algorithm)
    }
}

impl<E: Evaluator<Mancala>> SearchPlayer<E> {
    pub fn with_evaluator(depth: u32, algorithm: SearchAlgorithm, evaluator: E) -> Self {
        Self {
            depth,
            algorithm,
            evaluator,
        }
    }

    /// Full search result including value and node count
    pub fn search(&self, state: &GameState) -> SearchResult<usize> {
        search::<Mancala, _, _>(
            state,
            self.algorithm,
            &DepthCutoff::new(self.depth),
            &self.evaluator,
        )
    }

    /// Get best move for current position
    pub fn best_move(&self, state: &GameState) -> Option<usize> {
        self.search(state).best_move
    }

    /// Play both sides until the game ends or `max_moves` is reached
    pub fn play_game(&self, initial: GameState, max_moves: usize) -> (GameState, Vec<usize>) {
        let mut state = initial;
        let mut history = Vec::new();

        while !state.is_terminal() && history.len() < max_moves {
            let Some(pit) = self.best_move(&state) else {
                break;
            };
            if state.apply(pit).is_err() {
                break;
            }
            history.push(pit);
        }

        (state, history)
    }
}

// ============================================================================
// TESTS
// ============================================================================
