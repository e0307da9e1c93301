pub mod board;
pub mod common;
pub mod marble;

pub use board::{Board, BoardError};
pub use common::{Direction, Position};
pub use marble::{Color, Marble, MarbleId};
