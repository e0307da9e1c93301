//! Deterministic rules for the marble lines puzzle.
//!
//! `lines-core` defines the board, the router that finds walkable paths for
//! a moving marble, the match engine that clears runs, and the turn
//! controller that sequences a turn. Nothing here draws, sleeps, or logs:
//! hosts feed touches, tick signals and a random source through
//! [`engine::TurnController`] and read back state and events.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod route;
pub mod scoring;
pub mod state;

pub use config::GameConfig;
pub use engine::{
    Animation, GameEvent, GameStatus, Geometry, MoveSummary, PixelOffset, TickOutcome,
    TouchOutcome, TurnController, TurnError, TurnPhase, TurnStage,
};
pub use env::{PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use route::{OccupancyGrid, Route, find_route};
pub use scoring::{Clearance, Line, LineKind, resolve, resolve_clearance};
pub use state::{Board, BoardError, Color, Direction, Marble, MarbleId, Position};
