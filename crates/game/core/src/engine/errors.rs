//! Error types for the turn controller.
//!
//! Rejected routes and ignored touches are outcomes, not errors. A
//! [`TurnError`] means the board disagreed with the controller's own
//! bookkeeping, or the host handed over an unusable geometry.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BoardError, Position};

/// Identifies which step of a turn touched the board when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnStage {
    Spawn,
    Relocate,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("{stage} failed: {source}")]
    Board {
        stage: TurnStage,
        #[source]
        source: BoardError,
    },

    #[error("a {board_pixels}px board cannot fit {cells} cells per side")]
    InvalidGeometry { board_pixels: u32, cells: usize },
}

impl TurnError {
    pub(crate) fn board(stage: TurnStage) -> impl FnOnce(BoardError) -> Self {
        move |source| Self::Board { stage, source }
    }
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Board { .. } => ErrorSeverity::Internal,
            Self::InvalidGeometry { .. } => ErrorSeverity::Validation,
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::Board { source, .. } => source.position(),
            Self::InvalidGeometry { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Board { .. } => "TURN_BOARD_DESYNC",
            Self::InvalidGeometry { .. } => "TURN_INVALID_GEOMETRY",
        }
    }
}
