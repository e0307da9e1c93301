use crate::config::GameConfig;
use crate::state::Position;

/// Routing grid with a dual-use cell encoding.
///
/// - `0`: free and not yet reached by a search
/// - `u32::MAX`: blocked by a marble
/// - `1..`: breadth-first distance label from the search origin
///
/// Boards derive a fresh grid for every search; it is never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: [u32; GameConfig::CELL_COUNT],
}

impl OccupancyGrid {
    pub const FREE: u32 = 0;
    pub const BLOCKED: u32 = u32::MAX;

    /// An all-free grid.
    pub const fn new() -> Self {
        Self {
            cells: [Self::FREE; GameConfig::CELL_COUNT],
        }
    }

    /// Builds a grid with the given cells blocked. Out-of-bounds cells are skipped.
    pub fn from_blocked<I>(blocked: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut grid = Self::new();
        for position in blocked {
            grid.block(position);
        }
        grid
    }

    pub fn block(&mut self, position: Position) {
        self.set_label(position, Self::BLOCKED);
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.label(position) == Self::BLOCKED
    }

    /// True for cells that are neither blocked nor labeled.
    pub fn is_free(&self, position: Position) -> bool {
        self.label(position) == Self::FREE
    }

    /// Out-of-bounds cells read as blocked.
    pub fn label(&self, position: Position) -> u32 {
        if position.in_bounds() {
            self.cells[position.index()]
        } else {
            Self::BLOCKED
        }
    }

    pub(crate) fn set_label(&mut self, position: Position, label: u32) {
        if position.in_bounds() {
            self.cells[position.index()] = label;
        }
    }

    /// True when `label` is a distance written by a search.
    pub(crate) fn is_distance(label: u32) -> bool {
        label != Self::FREE && label != Self::BLOCKED
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}
