use std::io;

use thiserror::Error;

use crate::snake::Position;

/// Structural errors raised while building or scripting a game.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum EngineError {
    #[error("grid {width}x{height} is invalid: {reason}")]
    InvalidGrid {
        width: u16,
        height: u16,
        reason: &'static str,
    },

    #[error("tick period must be greater than zero")]
    InvalidPeriod,

    #[error("snake must have at least one segment")]
    EmptySnake,

    #[error("position {0} lies outside the grid")]
    OutOfBounds(Position),

    #[error("snake occupies {0} more than once")]
    OverlappingSegments(Position),

    #[error("food cannot be placed on the snake at {0}")]
    FoodOnSnake(Position),
}

/// Failures of the score persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("score file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
