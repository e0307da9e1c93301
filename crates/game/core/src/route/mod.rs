//! Obstacle-aware routing between two cells.
//!
//! [`find_route`] runs a breadth-first search outward from the destination,
//! writing distance labels into a copy of the [`OccupancyGrid`], then walks
//! back from the start along strictly decreasing labels. The destination is
//! never labeled; the walk ends by plain adjacency instead.
//!
//! Neighbor priorities decide which of several shortest routes is returned:
//!
//! - expansion and the first step from the start: Left, Right, Up, Down
//! - every later step: Right, Left, Down, Up
mod occupancy;

pub use occupancy::OccupancyGrid;

use std::collections::VecDeque;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::{Direction, Position};

const EXPANSION_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

const WALK_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Ordered unit steps leading from one cell to another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    steps: ArrayVec<Direction, { GameConfig::CELL_COUNT }>,
}

impl Route {
    /// The zero-length route.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn directions(&self) -> &[Direction] {
        &self.steps
    }

    /// Cell reached by applying every step to `from`.
    pub fn destination(&self, from: Position) -> Position {
        self.steps
            .iter()
            .fold(from, |position, &direction| position.step(direction))
    }

    fn push(&mut self, direction: Direction) -> Option<()> {
        self.steps.try_push(direction).ok()
    }
}

impl FromIterator<Direction> for Route {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().take(GameConfig::CELL_COUNT).collect(),
        }
    }
}

/// Finds a shortest orthogonal route from `start` to `end`.
///
/// `start` is the moving marble's cell and may be blocked in `grid`; `end`
/// must be free. Returns `None` when no route exists and an empty route when
/// `start == end`. The caller's grid is left untouched.
pub fn find_route(grid: &OccupancyGrid, start: Position, end: Position) -> Option<Route> {
    if start == end {
        return Some(Route::new());
    }
    if !start.in_bounds() || !end.in_bounds() || !grid.is_free(end) {
        return None;
    }

    let mut labels = grid.clone();
    if !label_until_reached(&mut labels, start, end) {
        return None;
    }

    walk_labels(&mut labels, start, end)
}

/// Breadth-first labeling from `end`. Stops as soon as `start` is seen.
fn label_until_reached(labels: &mut OccupancyGrid, start: Position, end: Position) -> bool {
    let mut frontier = VecDeque::from([end]);

    while let Some(cell) = frontier.pop_front() {
        let next = labels.label(cell) + 1;

        for direction in EXPANSION_ORDER {
            let Some(neighbor) = cell.neighbor(direction) else {
                continue;
            };
            if neighbor == start {
                return true;
            }
            if neighbor != end && labels.is_free(neighbor) {
                labels.set_label(neighbor, next);
                frontier.push_back(neighbor);
            }
        }
    }

    false
}

/// Rebuilds the step sequence from `start` by following decreasing labels.
fn walk_labels(labels: &mut OccupancyGrid, start: Position, end: Position) -> Option<Route> {
    labels.set_label(start, OccupancyGrid::FREE);

    let mut residual = EXPANSION_ORDER
        .into_iter()
        .filter_map(|direction| start.neighbor(direction))
        .map(|neighbor| labels.label(neighbor))
        .find(|&label| OccupancyGrid::is_distance(label))
        .unwrap_or(0);

    let mut route = Route::new();
    let mut current = start;

    loop {
        if residual == 0 {
            let direction = WALK_ORDER
                .into_iter()
                .find(|&direction| current.step(direction) == end)?;
            route.push(direction)?;
            return Some(route);
        }

        let direction = WALK_ORDER.into_iter().find(|&direction| {
            current
                .neighbor(direction)
                .is_some_and(|neighbor| labels.label(neighbor) == residual)
        })?;
        route.push(direction)?;
        current = current.step(direction);
        residual -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, RngOracle};

    use Direction::{Down, Left, Right, Up};

    /// Plain BFS distance from `start` to `end`, ignoring `start`'s own block.
    fn reference_distance(grid: &OccupancyGrid, start: Position, end: Position) -> Option<usize> {
        let mut distance = vec![None; GameConfig::CELL_COUNT];
        distance[start.index()] = Some(0usize);
        let mut queue = VecDeque::from([start]);
        while let Some(cell) = queue.pop_front() {
            let here = distance[cell.index()]?;
            if cell == end {
                return Some(here);
            }
            for direction in Direction::ALL {
                if let Some(next) = cell.neighbor(direction)
                    && !grid.is_blocked(next)
                    && distance[next.index()].is_none()
                {
                    distance[next.index()] = Some(here + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_valid(grid: &OccupancyGrid, start: Position, end: Position, route: &Route) {
        assert_eq!(route.destination(start), end);
        let mut cell = start;
        for &direction in &route.directions()[..route.len().saturating_sub(1)] {
            cell = cell.step(direction);
            assert!(cell.in_bounds());
            assert!(!grid.is_blocked(cell), "route passes through {cell}");
        }
    }

    #[test]
    fn same_cell_yields_empty_route() {
        let grid = OccupancyGrid::from_blocked([Position::new(3, 3)]);
        let route = find_route(&grid, Position::new(3, 3), Position::new(3, 3)).unwrap();
        assert!(route.is_empty());
    }

    #[test]
    fn adjacent_destination_is_one_step() {
        let start = Position::new(4, 4);
        let grid = OccupancyGrid::from_blocked([start]);
        for direction in Direction::ALL {
            let end = start.step(direction);
            let route = find_route(&grid, start, end).unwrap();
            assert_eq!(route.directions(), &[direction]);
        }
    }

    #[test]
    fn open_board_prefers_horizontal_steps_first() {
        let start = Position::new(0, 0);
        let grid = OccupancyGrid::from_blocked([start]);

        let route = find_route(&grid, start, Position::new(2, 2)).unwrap();
        assert_eq!(route.directions(), &[Right, Right, Down, Down]);

        let start = Position::new(2, 2);
        let grid = OccupancyGrid::from_blocked([start]);
        let route = find_route(&grid, start, Position::new(0, 0)).unwrap();
        assert_eq!(route.directions(), &[Left, Left, Up, Up]);
    }

    #[test]
    fn routes_around_a_wall() {
        // Column x = 1 blocked except at the bottom row.
        let start = Position::new(0, 0);
        let end = Position::new(2, 0);
        let mut blocked: Vec<Position> = (0..9).map(|y| Position::new(1, y)).collect();
        blocked.push(start);
        let grid = OccupancyGrid::from_blocked(blocked);

        let route = find_route(&grid, start, end).unwrap();
        assert_eq!(route.len(), 20);
        assert_valid(&grid, start, end, &route);
    }

    #[test]
    fn enclosed_destination_is_unreachable() {
        let start = Position::new(0, 0);
        let end = Position::new(5, 5);
        let grid = OccupancyGrid::from_blocked([
            start,
            Position::new(4, 5),
            Position::new(6, 5),
            Position::new(5, 4),
            Position::new(5, 6),
        ]);
        assert_eq!(find_route(&grid, start, end), None);
    }

    #[test]
    fn enclosed_start_is_unreachable() {
        let start = Position::new(0, 0);
        let grid = OccupancyGrid::from_blocked([start, Position::new(1, 0), Position::new(0, 1)]);
        assert_eq!(find_route(&grid, start, Position::new(9, 9)), None);
    }

    #[test]
    fn blocked_destination_is_rejected() {
        let start = Position::new(0, 0);
        let end = Position::new(3, 0);
        let grid = OccupancyGrid::from_blocked([start, end]);
        assert_eq!(find_route(&grid, start, end), None);
    }

    #[test]
    fn caller_grid_is_not_modified() {
        let start = Position::new(0, 0);
        let grid = OccupancyGrid::from_blocked([start]);
        let before = grid.clone();
        find_route(&grid, start, Position::new(7, 7)).unwrap();
        assert_eq!(grid, before);
    }

    #[test]
    fn matches_reference_distance_on_random_boards() {
        let mut rng = PcgRng::new(2024);

        for _ in 0..200 {
            let density = 10 + rng.below(50);
            let blocked: Vec<Position> = (0..GameConfig::CELL_COUNT)
                .filter(|_| rng.below(100) < density)
                .map(Position::from_index)
                .collect();
            let mut grid = OccupancyGrid::from_blocked(blocked);

            let start = Position::from_index(rng.below(100) as usize);
            let end = Position::from_index(rng.below(100) as usize);
            if start == end {
                continue;
            }
            grid.block(start);
            grid.set_label(end, OccupancyGrid::FREE);

            let expected = reference_distance(&grid, start, end);
            let route = find_route(&grid, start, end);

            match (expected, route) {
                (Some(distance), Some(route)) => {
                    assert_eq!(route.len(), distance, "{start} -> {end}");
                    assert_valid(&grid, start, end, &route);
                }
                (None, None) => {}
                (expected, route) => {
                    panic!("{start} -> {end}: expected {expected:?}, got {route:?}")
                }
            }
        }
    }
}
