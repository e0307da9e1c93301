//! Errors surfaced by a running session.
use thiserror::Error;

use lines_core::{ErrorSeverity, GameError, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("board of {board_pixels}px is too small for the grid")]
    InvalidGeometry { board_pixels: u32 },

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl RuntimeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidGeometry { .. } => ErrorSeverity::Validation,
            Self::Turn(err) => err.severity(),
        }
    }
}
