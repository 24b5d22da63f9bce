//! Rule violations reported by the game engine

use thiserror::Error;

/// Errors raised by board construction and move application
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// Constructor arguments that cannot describe a board
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Pit out of range or empty for the side to move
    #[error("invalid move: pit {pit}")]
    InvalidMove { pit: usize },

    /// The game has already finished
    #[error("game is already over")]
    GameOver,
}

impl GameError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        GameError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
