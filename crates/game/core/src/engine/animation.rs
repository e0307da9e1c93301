use std::collections::VecDeque;

use crate::route::Route;
use crate::state::{Marble, Position};

/// Pixel displacement relative to a marble's resting cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelOffset {
    pub dx: f32,
    pub dy: f32,
}

impl PixelOffset {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// A move in flight: the marble, where it goes, and the sub-steps still to
/// be drawn. One sub-step is consumed per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    marble: Marble,
    destination: Position,
    pending: VecDeque<PixelOffset>,
    offset: PixelOffset,
}

impl Animation {
    /// Expands `route` into sub-steps of `step` pixels. Every cell is crossed
    /// in `floor(cell_size / step)` full steps plus one step for the
    /// fractional remainder, if any.
    pub fn new(marble: Marble, route: &Route, cell_size: f32, step: u32) -> Self {
        let step = step.max(1) as f32;
        let full_steps = (cell_size / step).floor() as u32;
        let remainder = cell_size % step;

        let mut pending = VecDeque::new();
        for direction in route.directions() {
            let (dx, dy) = direction.delta();
            let (dx, dy) = (dx as f32, dy as f32);
            for _ in 0..full_steps {
                pending.push_back(PixelOffset::new(dx * step, dy * step));
            }
            if remainder > 0.0 {
                pending.push_back(PixelOffset::new(dx * remainder, dy * remainder));
            }
        }

        Self {
            marble,
            destination: route.destination(marble.position),
            pending,
            offset: PixelOffset::ZERO,
        }
    }

    pub fn marble(&self) -> &Marble {
        &self.marble
    }

    pub fn origin(&self) -> Position {
        self.marble.position
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    /// Accumulated displacement drawn so far.
    pub fn offset(&self) -> PixelOffset {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Applies the next sub-step. Returns `None` once the queue is drained.
    pub fn advance(&mut self) -> Option<PixelOffset> {
        let next = self.pending.pop_front()?;
        self.offset.dx += next.dx;
        self.offset.dy += next.dy;
        Some(self.offset)
    }
}
