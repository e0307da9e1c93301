use std::cmp::Ordering;
use std::fmt;

use crate::config::GameConfig;

const SIDE: i32 = GameConfig::CELLS_PER_SIDE as i32;

/// Discrete grid position expressed in cell coordinates.
///
/// `x` grows to the right and `y` grows downward, matching pixel space.
/// Positions order row-major, the same as [`Position::index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < SIDE && self.y < SIDE
    }

    /// Row-major slot index. Only meaningful for in-bounds positions.
    #[inline]
    pub const fn index(self) -> usize {
        (self.y * SIDE + self.x) as usize
    }

    pub const fn from_index(index: usize) -> Self {
        let index = index as i32;
        Self::new(index % SIDE, index / SIDE)
    }

    /// Neighbor one cell away, without bounds checking.
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Neighbor one cell away, or `None` when it falls off the board.
    pub fn neighbor(self, direction: Direction) -> Option<Self> {
        let next = self.step(direction);
        next.in_bounds().then_some(next)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit step between orthogonally adjacent cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
