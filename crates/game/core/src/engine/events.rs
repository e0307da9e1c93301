//! Facts recorded by the turn controller.
//!
//! Every observable transition pushes a [`GameEvent`]; hosts drain them after
//! each call and fan them out to their own listeners.

use crate::scoring::LineKind;
use crate::state::{Color, Marble, MarbleId, Position};

/// Whether a game is in progress. `Stopped` is both "not yet started" and
/// "game over".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Stopped,
    Started,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    StatusChanged {
        status: GameStatus,
    },
    ScoreChanged {
        total: u32,
        gained: u32,
    },
    MarbleSelected {
        marble: MarbleId,
        position: Position,
    },
    /// The selected marble has no route to the touched cell.
    MoveRejected {
        marble: MarbleId,
        from: Position,
        to: Position,
    },
    MoveStarted {
        marble: MarbleId,
        from: Position,
        to: Position,
        steps: usize,
    },
    MarbleMoved {
        marble: MarbleId,
        from: Position,
        to: Position,
    },
    LineCleared {
        line: LineKind,
        color: Color,
        cells: Vec<Position>,
        points: u32,
    },
    MarblesSpawned {
        marbles: Vec<Marble>,
    },
}

impl GameEvent {
    /// Short static label, handy for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StatusChanged { .. } => "status_changed",
            Self::ScoreChanged { .. } => "score_changed",
            Self::MarbleSelected { .. } => "marble_selected",
            Self::MoveRejected { .. } => "move_rejected",
            Self::MoveStarted { .. } => "move_started",
            Self::MarbleMoved { .. } => "marble_moved",
            Self::LineCleared { .. } => "line_cleared",
            Self::MarblesSpawned { .. } => "marbles_spawned",
        }
    }
}
