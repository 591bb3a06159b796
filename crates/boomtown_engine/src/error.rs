//! Error types for the Boomtown engine
//!
//! Only failures the caller must act on are errors. Moves that break the turn
//! protocol (out-of-turn surveys, double claims, selling someone else's deed)
//! are logged and answered with the re-prompted view instead.

use crate::entity::Entity;
use thiserror::Error;

/// Failures surfaced by the game API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game has already started; joining is only possible in the lobby")]
    AlreadyStarted,

    #[error("Game is over")]
    GameOver,

    #[error("Unknown player: {0}")]
    UnknownPlayer(Entity),

    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("Game coordinator is no longer running")]
    Closed,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for GameError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        GameError::Closed
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for GameError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        GameError::Closed
    }
}

// Result type alias for convenience
pub type GameResult<T> = Result<T, GameError>;
