use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::route::OccupancyGrid;

use super::{Color, Marble, MarbleId, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    #[error("cell {position} is outside the board")]
    OutOfBounds { position: Position },

    #[error("cell {position} is already occupied")]
    Occupied { position: Position },

    #[error("cell {position} holds no marble")]
    Vacant { position: Position },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } => ErrorSeverity::Validation,
            Self::Occupied { .. } => ErrorSeverity::Recoverable,
            Self::Vacant { .. } => ErrorSeverity::Internal,
        }
    }

    fn position(&self) -> Option<Position> {
        match self {
            Self::OutOfBounds { position }
            | Self::Occupied { position }
            | Self::Vacant { position } => Some(*position),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "BOARD_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "BOARD_OCCUPIED",
            Self::Vacant { .. } => "BOARD_VACANT",
        }
    }
}

/// The N×N grid and the marbles sitting on it.
///
/// At most one marble per cell. Marble identities are allocated
/// sequentially and never reused within a board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    marbles: BTreeMap<Position, Marble>,
    next_marble_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self {
            marbles: BTreeMap::new(),
            next_marble_id: 0,
        }
    }

    pub fn get(&self, position: Position) -> Option<&Marble> {
        self.marbles.get(&position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.marbles.contains_key(&position)
    }

    /// True when `position` holds a marble of `color`.
    pub fn holds(&self, position: Position, color: Color) -> bool {
        self.get(position).is_some_and(|marble| marble.color == color)
    }

    pub fn len(&self) -> usize {
        self.marbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marbles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.marbles.len() >= GameConfig::CELL_COUNT
    }

    /// Marbles in row-major order.
    pub fn marbles(&self) -> impl Iterator<Item = &Marble> {
        self.marbles.values()
    }

    pub fn find(&self, id: MarbleId) -> Option<&Marble> {
        self.marbles.values().find(|marble| marble.id == id)
    }

    /// Unoccupied cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        (0..GameConfig::CELL_COUNT)
            .map(Position::from_index)
            .filter(|position| !self.is_occupied(*position))
            .collect()
    }

    /// Places a new marble, allocating a fresh identity.
    pub fn place(&mut self, position: Position, color: Color) -> Result<Marble, BoardError> {
        Self::check_bounds(position)?;
        if self.is_occupied(position) {
            return Err(BoardError::Occupied { position });
        }

        let marble = Marble::new(MarbleId(self.next_marble_id), position, color);
        self.next_marble_id += 1;
        self.marbles.insert(position, marble);
        Ok(marble)
    }

    pub fn remove(&mut self, position: Position) -> Option<Marble> {
        self.marbles.remove(&position)
    }

    /// Moves the marble at `from` onto `to`, keeping its identity.
    pub fn relocate(&mut self, from: Position, to: Position) -> Result<Marble, BoardError> {
        Self::check_bounds(from)?;
        Self::check_bounds(to)?;
        if from == to {
            return self
                .get(from)
                .copied()
                .ok_or(BoardError::Vacant { position: from });
        }
        if self.is_occupied(to) {
            return Err(BoardError::Occupied { position: to });
        }

        let mut marble = self
            .marbles
            .remove(&from)
            .ok_or(BoardError::Vacant { position: from })?;
        marble.position = to;
        self.marbles.insert(to, marble);
        Ok(marble)
    }

    /// Derives the routing grid: every occupied cell is blocked.
    pub fn occupancy(&self) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new();
        for position in self.marbles.keys() {
            grid.block(*position);
        }
        grid
    }

    /// Removes every marble. Identities keep counting upward.
    pub fn clear(&mut self) {
        self.marbles.clear();
    }

    fn check_bounds(position: Position) -> Result<(), BoardError> {
        if position.in_bounds() {
            Ok(())
        } else {
            Err(BoardError::OutOfBounds { position })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_rejects_occupied_and_out_of_bounds() {
        let mut board = Board::new();
        let origin = Position::new(2, 3);
        board.place(origin, Color::Red).unwrap();

        assert_eq!(
            board.place(origin, Color::Blue),
            Err(BoardError::Occupied { position: origin })
        );
        let outside = Position::new(10, 0);
        assert_eq!(
            board.place(outside, Color::Blue),
            Err(BoardError::OutOfBounds { position: outside })
        );
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn relocate_preserves_identity() {
        let mut board = Board::new();
        let placed = board.place(Position::new(0, 0), Color::Green).unwrap();

        let moved = board
            .relocate(Position::new(0, 0), Position::new(5, 5))
            .unwrap();

        assert_eq!(moved.id, placed.id);
        assert_eq!(moved.position, Position::new(5, 5));
        assert!(!board.is_occupied(Position::new(0, 0)));
        assert_eq!(board.get(Position::new(5, 5)).map(|m| m.id), Some(placed.id));
    }

    #[test]
    fn relocate_from_vacant_cell_is_internal() {
        let mut board = Board::new();
        let err = board
            .relocate(Position::new(1, 1), Position::new(2, 2))
            .unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Internal);
        assert_eq!(err.error_code(), "BOARD_VACANT");
    }

    #[test]
    fn empty_cells_are_row_major() {
        let mut board = Board::new();
        board.place(Position::new(0, 0), Color::Red).unwrap();
        board.place(Position::new(1, 0), Color::Red).unwrap();

        let empty = board.empty_cells();
        assert_eq!(empty.len(), GameConfig::CELL_COUNT - 2);
        assert_eq!(empty[0], Position::new(2, 0));
        assert_eq!(empty[8], Position::new(0, 1));
    }

    #[test]
    fn marbles_iterate_row_major() {
        let mut board = Board::new();
        board.place(Position::new(0, 1), Color::Red).unwrap();
        board.place(Position::new(3, 0), Color::Blue).unwrap();

        let order: Vec<Position> = board.marbles().map(|m| m.position).collect();
        assert_eq!(order, vec![Position::new(3, 0), Position::new(0, 1)]);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut board = Board::new();
        let first = board.place(Position::new(0, 0), Color::Red).unwrap();
        board.clear();
        let second = board.place(Position::new(0, 0), Color::Red).unwrap();
        assert!(second.id > first.id);
        assert!(board.find(first.id).is_none());
    }
}
