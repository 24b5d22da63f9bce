//! Mancala Core - Game engine and AI
//!
//! This crate provides the core logic for Mancala:
//! - Board layout and stone sowing
//! - Game state, captures, extra turns and the end-of-game sweep
//! - A generic minimax / alpha-beta search over a two-player game trait
//! - Store-difference evaluation and a search-based player
//! - Configuration and text rendering

pub mod board;
pub mod error;
pub mod game;
pub mod config;
pub mod search;
pub mod eval;
pub mod ai;
pub mod render;

// Re-exports for convenient access
pub use board::Board;
pub use error::GameError;
pub use game::{new_game, GameState, MoveReport, Outcome, Player};
pub use config::{AiConfig, GameConfig};
pub use search::{
    alpha_beta_search, minimax_search, search, CutoffTest, DepthCutoff, Evaluator, Game,
    SearchAlgorithm, SearchResult, UtilityEvaluator,
};
pub use eval::{store_difference, Mancala, StoreDifference};
pub use ai::{choose_move, SearchPlayer};
pub use render::render_board;
