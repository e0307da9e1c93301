use crate::config::GameConfig;
use crate::state::Position;

use super::TurnError;

const SIDE: f32 = GameConfig::CELLS_PER_SIDE as f32;

/// Maps pixel coordinates on the host's drawing surface to board cells.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    board_pixels: u32,
    cell_size: f32,
}

impl Geometry {
    /// Square board `board_pixels` wide, split into N equal cells. Cell size
    /// is fractional when the width is not a multiple of N.
    pub fn new(board_pixels: u32) -> Result<Self, TurnError> {
        if (board_pixels as usize) < GameConfig::CELLS_PER_SIDE {
            return Err(TurnError::InvalidGeometry {
                board_pixels,
                cells: GameConfig::CELLS_PER_SIDE,
            });
        }
        Ok(Self {
            board_pixels,
            cell_size: board_pixels as f32 / SIDE,
        })
    }

    pub fn board_pixels(&self) -> u32 {
        self.board_pixels
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell under the pointer, or `None` outside the grid.
    pub fn cell_at(&self, px: f32, py: f32) -> Option<Position> {
        if !px.is_finite() || !py.is_finite() || px < 0.0 || py < 0.0 {
            return None;
        }
        let position = Position::new(
            (px / self.cell_size).floor() as i32,
            (py / self.cell_size).floor() as i32,
        );
        position.in_bounds().then_some(position)
    }

    /// Pixel center of `position`.
    pub fn cell_center(&self, position: Position) -> (f32, f32) {
        let size = self.cell_size;
        (
            position.x as f32 * size + size / 2.0,
            position.y as f32 * size + size / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_boards_smaller_than_the_grid() {
        assert!(matches!(
            Geometry::new(9),
            Err(TurnError::InvalidGeometry { board_pixels: 9, .. })
        ));
        assert_eq!(Geometry::new(10).unwrap().cell_size(), 1.0);
    }

    #[test]
    fn pixels_map_to_cells() {
        let geometry = Geometry::new(500).unwrap();
        assert_eq!(geometry.cell_at(0.0, 0.0), Some(Position::new(0, 0)));
        assert_eq!(geometry.cell_at(49.9, 50.0), Some(Position::new(0, 1)));
        assert_eq!(geometry.cell_at(499.0, 250.0), Some(Position::new(9, 5)));
    }

    #[test]
    fn fractional_cells_cover_the_whole_board() {
        let geometry = Geometry::new(505).unwrap();
        assert_eq!(geometry.cell_size(), 50.5);
        assert_eq!(geometry.cell_at(252.0, 0.0), Some(Position::new(4, 0)));
        assert_eq!(geometry.cell_at(252.5, 0.0), Some(Position::new(5, 0)));
        assert_eq!(geometry.cell_at(503.0, 504.0), Some(Position::new(9, 9)));
    }

    #[test]
    fn outside_pixels_are_dropped() {
        let geometry = Geometry::new(505).unwrap();
        assert_eq!(geometry.cell_at(-1.0, 10.0), None);
        assert_eq!(geometry.cell_at(505.0, 10.0), None);
        assert_eq!(geometry.cell_at(f32::NAN, 10.0), None);
    }

    #[test]
    fn cell_center_round_trips() {
        for pixels in [480, 505, 777] {
            let geometry = Geometry::new(pixels).unwrap();
            let position = Position::new(7, 2);
            let (x, y) = geometry.cell_center(position);
            assert_eq!(geometry.cell_at(x, y), Some(position));
        }
    }
}
