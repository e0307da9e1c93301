use std::fmt;

use strum::EnumCount;

use super::Position;

/// Marble color. Only equality matters to the rules; how a color is drawn
/// is up to the host.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Color {
    Blue,
    Orange,
    Yellow,
    Brown,
    Green,
    Red,
}

impl Color {
    pub const ALL: [Color; Color::COUNT] = [
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Brown,
        Color::Green,
        Color::Red,
    ];
}

/// Stable marble identity. Allocated when a marble spawns and kept across
/// relocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarbleId(pub u32);

impl fmt::Display for MarbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A colored token occupying exactly one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marble {
    pub id: MarbleId,
    pub position: Position,
    pub color: Color,
}

impl Marble {
    pub const fn new(id: MarbleId, position: Position, color: Color) -> Self {
        Self {
            id,
            position,
            color,
        }
    }
}
