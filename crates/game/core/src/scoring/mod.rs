//! Run detection and clearing.
//!
//! After a marble lands, [`resolve`] looks for a run of at least
//! [`GameConfig::RUN_LENGTH`] same-colored marbles on the lines through the
//! landing cell, in a fixed order: row, column, falling diagonal, rising
//! diagonal. Only the first line that qualifies is cleared, and it is cleared
//! in full from the first marble of the run to the first gap or mismatch.
use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{Board, Color, Marble, Position};

const SIDE: i32 = GameConfig::CELLS_PER_SIDE as i32;

/// Line families through a cell, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LineKind {
    /// Fixed row, left to right.
    Row,
    /// Fixed column, top to bottom.
    Column,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl LineKind {
    pub const ALL: [LineKind; 4] = [
        LineKind::Row,
        LineKind::Column,
        LineKind::Diagonal,
        LineKind::AntiDiagonal,
    ];
}

/// One full line of the board passing through a given cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    origin: Position,
    delta: (i32, i32),
    len: usize,
}

impl Line {
    /// The line of `kind` through `position`, starting at its edge cell.
    pub fn through(kind: LineKind, position: Position) -> Self {
        let Position { x: column, y: row } = position;

        let (origin, delta, len) = match kind {
            LineKind::Row => (Position::new(0, row), (1, 0), SIDE),
            LineKind::Column => (Position::new(column, 0), (0, 1), SIDE),
            LineKind::Diagonal => {
                if column <= row {
                    let y = row - column;
                    (Position::new(0, y), (1, 1), SIDE - y)
                } else {
                    let x = column - row;
                    (Position::new(x, 0), (1, 1), SIDE - x)
                }
            }
            LineKind::AntiDiagonal => {
                if column + row >= SIDE - 1 {
                    let y = row + column - SIDE + 1;
                    (Position::new(SIDE - 1, y), (-1, 1), SIDE - y)
                } else {
                    let x = column + row;
                    (Position::new(x, 0), (-1, 1), x + 1)
                }
            }
        };

        Self {
            kind,
            origin,
            delta,
            len: len.max(0) as usize,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cell(&self, index: usize) -> Position {
        let i = index as i32;
        Position::new(self.origin.x + self.delta.0 * i, self.origin.y + self.delta.1 * i)
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len).map(|index| self.cell(index))
    }

    /// Index of the first cell of the first qualifying run of `color`.
    fn qualifying_run(&self, board: &Board, color: Color) -> Option<usize> {
        if self.len < GameConfig::RUN_LENGTH {
            return None;
        }

        let mut run_start = None;
        let mut run = 0;
        for (index, cell) in self.cells().enumerate() {
            if board.holds(cell, color) {
                let start = *run_start.get_or_insert(index);
                run += 1;
                if run >= GameConfig::RUN_LENGTH {
                    return Some(start);
                }
            } else {
                run_start = None;
                run = 0;
            }
        }
        None
    }
}

/// Marbles removed by one qualifying run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clearance {
    pub line: LineKind,
    pub removed: ArrayVec<Marble, { GameConfig::CELLS_PER_SIDE }>,
}

impl Clearance {
    /// Points earned: one per removed marble.
    pub fn points(&self) -> u32 {
        self.removed.len() as u32
    }
}

/// Clears the first qualifying run through `position` and returns the
/// points earned, or 0 with the board untouched.
pub fn resolve(board: &mut Board, color: Color, position: Position) -> u32 {
    resolve_clearance(board, color, position).map_or(0, |clearance| clearance.points())
}

/// Like [`resolve`], but reports which line was cleared and what was removed.
pub fn resolve_clearance(board: &mut Board, color: Color, position: Position) -> Option<Clearance> {
    LineKind::ALL.into_iter().find_map(|kind| {
        let line = Line::through(kind, position);
        let start = line.qualifying_run(board, color)?;
        Some(clear_run(board, &line, start, color))
    })
}

/// Removes marbles from `start` onward until the run of `color` breaks.
fn clear_run(board: &mut Board, line: &Line, start: usize, color: Color) -> Clearance {
    let mut removed = ArrayVec::new();
    for cell in line.cells().skip(start) {
        if !board.holds(cell, color) {
            break;
        }
        if let Some(marble) = board.remove(cell) {
            removed.push(marble);
        }
    }

    Clearance {
        line: line.kind,
        removed,
    }
}
