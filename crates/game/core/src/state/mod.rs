//! Board model.
//!
//! This module owns the grid, the marbles on it and the coordinate types
//! shared by the router and the match engine. Only the turn controller
//! mutates the board during play; tests and hosts may build boards directly.
pub mod types;

pub use types::{Board, BoardError, Color, Direction, Marble, MarbleId, Position};
