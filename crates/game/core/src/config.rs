/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Pixel length of one animation sub-step. Each cell crossed by a move is
    /// split into `cell_size / animation_step` full steps plus a remainder.
    pub animation_step: u32,
}

impl GameConfig {
    // ===== compile-time rule constants =====
    /// Cells along one side of the square board.
    pub const CELLS_PER_SIDE: usize = 10;
    /// Total number of cells on the board.
    pub const CELL_COUNT: usize = Self::CELLS_PER_SIDE * Self::CELLS_PER_SIDE;
    /// Minimum run length that clears a line.
    pub const RUN_LENGTH: usize = 5;
    /// Marbles placed when a game starts.
    pub const INITIAL_MARBLES: usize = 5;
    /// Marbles spawned after a move that scored nothing.
    pub const SPAWN_BATCH: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ANIMATION_STEP: u32 = 5;

    pub fn new() -> Self {
        Self {
            animation_step: Self::DEFAULT_ANIMATION_STEP,
        }
    }

    /// Step lengths below one pixel are raised to one.
    pub fn with_animation_step(animation_step: u32) -> Self {
        Self {
            animation_step: animation_step.max(1),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
