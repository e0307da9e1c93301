//! Turn sequencing.
//!
//! [`TurnController`] owns the board and walks every turn through
//! select → route → animate → score → spawn → re-score → game-over check.
//! It never blocks or schedules anything itself: hosts deliver touches and
//! tick signals, and ask for another tick whenever an outcome says so.
mod animation;
mod errors;
mod events;
mod geometry;

pub use animation::{Animation, PixelOffset};
pub use errors::{TurnError, TurnStage};
pub use events::{GameEvent, GameStatus};
pub use geometry::Geometry;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::route::find_route;
use crate::scoring::{Clearance, resolve_clearance};
use crate::state::{Board, Color, Marble, Position};

/// Sub-state of a running game.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TurnPhase {
    #[default]
    Idle,
    Selected(Marble),
    Animating(Animation),
}

/// What a touch did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchOutcome {
    /// Dropped: a move is animating, the touch missed the grid, or nothing
    /// was selected when an empty cell was touched.
    Ignored,
    /// The game was stopped; the touch started a new one.
    Started,
    Selected(Position),
    /// No route from the selected marble; the selection stays.
    Unreachable,
    /// Animation began. The host must request a tick.
    MoveStarted { from: Position, to: Position, steps: usize },
}

/// What a tick did.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// No animation in flight.
    Idle,
    /// One sub-step drawn. The host must request another tick.
    Advanced(PixelOffset),
    /// The move landed and the turn resolved.
    Completed(MoveSummary),
}

/// Result of one finished move.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSummary {
    pub from: Position,
    pub to: Position,
    /// Points from the landing plus any spawn clears.
    pub points: u32,
    pub spawned: Vec<Marble>,
    pub game_over: bool,
}

/// Game state machine driving the router and the match engine.
pub struct TurnController<R: RngOracle> {
    config: GameConfig,
    geometry: Geometry,
    rng: R,
    board: Board,
    status: GameStatus,
    phase: TurnPhase,
    score: u32,
    events: Vec<GameEvent>,
}

impl<R: RngOracle> TurnController<R> {
    /// Creates a stopped controller with an empty board.
    pub fn new(config: GameConfig, geometry: Geometry, rng: R) -> Self {
        Self {
            config,
            geometry,
            rng,
            board: Board::new(),
            status: GameStatus::Stopped,
            phase: TurnPhase::Idle,
            score: 0,
            events: Vec::new(),
        }
    }

    /// Resumes play on a prepared board without spawning anything. Used to
    /// set up scenarios.
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self.phase = TurnPhase::Idle;
        self.set_status(GameStatus::Started);
        self
    }

    // ===== observables =====

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, TurnPhase::Animating(_))
    }

    /// The selected marble, including one that is currently moving.
    pub fn selected(&self) -> Option<&Marble> {
        match &self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Selected(marble) => Some(marble),
            TurnPhase::Animating(animation) => Some(animation.marble()),
        }
    }

    /// Pixel displacement of the moving marble from its origin cell.
    pub fn animation_offset(&self) -> Option<PixelOffset> {
        match &self.phase {
            TurnPhase::Animating(animation) => Some(animation.offset()),
            _ => None,
        }
    }

    /// Takes every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ===== transitions =====

    /// Begins a new game from any state on a fresh board.
    pub fn start(&mut self) -> Result<(), TurnError> {
        self.board = Board::new();
        self.phase = TurnPhase::Idle;
        self.set_status(GameStatus::Started);

        self.score = 0;
        self.events.push(GameEvent::ScoreChanged { total: 0, gained: 0 });

        self.spawn(GameConfig::INITIAL_MARBLES)?;
        Ok(())
    }

    /// Delivers a pointer event in board pixel coordinates.
    pub fn touch(&mut self, px: f32, py: f32) -> Result<TouchOutcome, TurnError> {
        if self.is_animating() {
            return Ok(TouchOutcome::Ignored);
        }
        if self.status == GameStatus::Stopped {
            self.start()?;
            return Ok(TouchOutcome::Started);
        }

        match self.geometry.cell_at(px, py) {
            Some(cell) => self.touch_cell(cell),
            None => Ok(TouchOutcome::Ignored),
        }
    }

    /// Delivers a touch already resolved to a cell.
    pub fn touch_cell(&mut self, cell: Position) -> Result<TouchOutcome, TurnError> {
        if self.is_animating() || !cell.in_bounds() {
            return Ok(TouchOutcome::Ignored);
        }
        if self.status == GameStatus::Stopped {
            self.start()?;
            return Ok(TouchOutcome::Started);
        }

        if let Some(marble) = self.board.get(cell).copied() {
            self.phase = TurnPhase::Selected(marble);
            self.events.push(GameEvent::MarbleSelected {
                marble: marble.id,
                position: cell,
            });
            return Ok(TouchOutcome::Selected(cell));
        }

        let TurnPhase::Selected(marble) = self.phase else {
            return Ok(TouchOutcome::Ignored);
        };

        let grid = self.board.occupancy();
        let Some(route) = find_route(&grid, marble.position, cell) else {
            self.events.push(GameEvent::MoveRejected {
                marble: marble.id,
                from: marble.position,
                to: cell,
            });
            return Ok(TouchOutcome::Unreachable);
        };

        let steps = route.len();
        let animation = Animation::new(
            marble,
            &route,
            self.geometry.cell_size(),
            self.config.animation_step,
        );
        self.phase = TurnPhase::Animating(animation);
        self.events.push(GameEvent::MoveStarted {
            marble: marble.id,
            from: marble.position,
            to: cell,
            steps,
        });

        Ok(TouchOutcome::MoveStarted {
            from: marble.position,
            to: cell,
            steps,
        })
    }

    /// Handles one tick signal: draws the next sub-step, or lands the marble
    /// and resolves the turn once the queue is empty.
    pub fn tick(&mut self) -> Result<TickOutcome, TurnError> {
        match &mut self.phase {
            TurnPhase::Animating(animation) => {
                if let Some(offset) = animation.advance() {
                    return Ok(TickOutcome::Advanced(offset));
                }
            }
            _ => return Ok(TickOutcome::Idle),
        }

        let TurnPhase::Animating(animation) = std::mem::take(&mut self.phase) else {
            return Ok(TickOutcome::Idle);
        };
        self.complete_move(&animation).map(TickOutcome::Completed)
    }

    fn complete_move(&mut self, animation: &Animation) -> Result<MoveSummary, TurnError> {
        let from = animation.origin();
        let to = animation.destination();
        let marble = self
            .board
            .relocate(from, to)
            .map_err(TurnError::board(TurnStage::Relocate))?;
        self.events.push(GameEvent::MarbleMoved {
            marble: marble.id,
            from,
            to,
        });

        let mut summary = MoveSummary {
            from,
            to,
            ..MoveSummary::default()
        };

        if let Some(clearance) = resolve_clearance(&mut self.board, marble.color, to) {
            summary.points += self.award(marble.color, clearance);
        } else {
            let spawned = self.spawn(GameConfig::SPAWN_BATCH)?;
            for placed in &spawned {
                if let Some(clearance) =
                    resolve_clearance(&mut self.board, placed.color, placed.position)
                {
                    summary.points += self.award(placed.color, clearance);
                }
            }
            summary.spawned = spawned;
        }

        if self.board.is_full() {
            self.set_status(GameStatus::Stopped);
            summary.game_over = true;
        }

        Ok(summary)
    }

    /// Places up to `count` marbles on distinct random empty cells with
    /// random colors. Stops early when the board fills.
    fn spawn(&mut self, count: usize) -> Result<Vec<Marble>, TurnError> {
        let mut empty = self.board.empty_cells();
        let mut placed = Vec::with_capacity(count);

        for _ in 0..count {
            if empty.is_empty() {
                break;
            }
            let cell = self.rng.below(empty.len() as u32) as usize;
            let color = Color::ALL[self.rng.below(Color::ALL.len() as u32) as usize];
            let position = empty.remove(cell);

            let marble = self
                .board
                .place(position, color)
                .map_err(TurnError::board(TurnStage::Spawn))?;
            placed.push(marble);
        }

        if !placed.is_empty() {
            self.events.push(GameEvent::MarblesSpawned {
                marbles: placed.clone(),
            });
        }
        Ok(placed)
    }

    fn award(&mut self, color: Color, clearance: Clearance) -> u32 {
        let points = clearance.points();
        self.score += points;
        self.events.push(GameEvent::LineCleared {
            line: clearance.line,
            color,
            cells: clearance.removed.iter().map(|marble| marble.position).collect(),
            points,
        });
        self.events.push(GameEvent::ScoreChanged {
            total: self.score,
            gained: points,
        });
        points
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            self.status = status;
            self.events.push(GameEvent::StatusChanged { status });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn controller() -> TurnController<PcgRng> {
        TurnController::new(
            GameConfig::default(),
            Geometry::new(500).unwrap(),
            PcgRng::new(11),
        )
    }

    fn board_with(cells: &[(i32, i32, Color)]) -> Board {
        let mut board = Board::new();
        for &(x, y, color) in cells {
            board.place(Position::new(x, y), color).unwrap();
        }
        board
    }

    fn run_to_completion<R: RngOracle>(controller: &mut TurnController<R>) -> MoveSummary {
        loop {
            match controller.tick().unwrap() {
                TickOutcome::Advanced(_) => continue,
                TickOutcome::Completed(summary) => return summary,
                TickOutcome::Idle => panic!("tick with no animation in flight"),
            }
        }
    }

    #[test]
    fn start_spawns_initial_batch_without_scoring() {
        let mut controller = controller();
        controller.start().unwrap();

        assert_eq!(controller.status(), GameStatus::Started);
        assert_eq!(controller.board().len(), GameConfig::INITIAL_MARBLES);
        assert_eq!(controller.score(), 0);

        let events = controller.drain_events();
        assert_eq!(
            events[0],
            GameEvent::StatusChanged {
                status: GameStatus::Started
            }
        );
        assert_eq!(events[1], GameEvent::ScoreChanged { total: 0, gained: 0 });
        assert!(matches!(
            &events[2],
            GameEvent::MarblesSpawned { marbles } if marbles.len() == GameConfig::INITIAL_MARBLES
        ));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn touch_while_stopped_starts_a_game() {
        let mut controller = controller();
        assert_eq!(controller.touch(10.0, 10.0).unwrap(), TouchOutcome::Started);
        assert_eq!(controller.status(), GameStatus::Started);
    }

    #[test]
    fn restart_discards_the_previous_board() {
        let mut controller = controller()
            .with_board(board_with(&[(0, 0, Color::Red), (1, 1, Color::Blue)]));
        controller.start().unwrap();
        assert_eq!(controller.board().len(), GameConfig::INITIAL_MARBLES);
        assert_eq!(controller.score(), 0);
    }

    #[test]
    fn touching_a_marble_selects_it() {
        let mut controller = controller()
            .with_board(board_with(&[(2, 2, Color::Red), (7, 7, Color::Blue)]));

        let outcome = controller.touch(125.0, 125.0).unwrap();
        assert_eq!(outcome, TouchOutcome::Selected(Position::new(2, 2)));

        controller.touch_cell(Position::new(7, 7)).unwrap();
        assert_eq!(
            controller.selected().map(|m| m.position),
            Some(Position::new(7, 7))
        );
    }

    #[test]
    fn empty_cell_without_selection_is_ignored() {
        let mut controller = controller().with_board(board_with(&[(2, 2, Color::Red)]));
        assert_eq!(
            controller.touch_cell(Position::new(5, 5)).unwrap(),
            TouchOutcome::Ignored
        );
        assert!(controller.selected().is_none());
    }

    #[test]
    fn touching_outside_the_grid_is_ignored() {
        let mut controller = controller().with_board(board_with(&[(2, 2, Color::Red)]));
        assert_eq!(controller.touch(-3.0, 40.0).unwrap(), TouchOutcome::Ignored);
        assert_eq!(controller.touch(40.0, 900.0).unwrap(), TouchOutcome::Ignored);
    }

    #[test]
    fn reselecting_the_same_marble_keeps_the_selection() {
        let mut controller = controller().with_board(board_with(&[(2, 2, Color::Red)]));
        controller.touch_cell(Position::new(2, 2)).unwrap();
        let outcome = controller.touch_cell(Position::new(2, 2)).unwrap();
        assert_eq!(outcome, TouchOutcome::Selected(Position::new(2, 2)));
        assert!(matches!(controller.phase(), TurnPhase::Selected(_)));
    }

    #[test]
    fn unreachable_destination_keeps_selection() {
        let walled = board_with(&[
            (0, 0, Color::Red),
            (1, 0, Color::Blue),
            (0, 1, Color::Blue),
        ]);
        let mut controller = controller().with_board(walled);

        controller.touch_cell(Position::new(0, 0)).unwrap();
        let outcome = controller.touch_cell(Position::new(5, 5)).unwrap();

        assert_eq!(outcome, TouchOutcome::Unreachable);
        assert!(matches!(controller.phase(), TurnPhase::Selected(m) if m.position == Position::ORIGIN));
        assert!(controller.board().is_occupied(Position::ORIGIN));
        assert!(controller
            .drain_events()
            .iter()
            .any(|event| matches!(event, GameEvent::MoveRejected { .. })));
    }

    #[test]
    fn touches_during_animation_are_dropped() {
        let mut controller = controller().with_board(board_with(&[(0, 0, Color::Red), (9, 9, Color::Blue)]));
        controller.touch_cell(Position::ORIGIN).unwrap();
        controller.touch_cell(Position::new(0, 3)).unwrap();
        assert!(controller.is_animating());

        controller.tick().unwrap();
        assert_eq!(
            controller.touch_cell(Position::new(9, 9)).unwrap(),
            TouchOutcome::Ignored
        );
        assert_eq!(controller.touch(5.0, 5.0).unwrap(), TouchOutcome::Ignored);
        assert!(controller.is_animating());
    }

    #[test]
    fn animation_takes_one_tick_per_sub_step() {
        let mut controller = controller().with_board(board_with(&[(0, 0, Color::Red)]));
        controller.touch_cell(Position::ORIGIN).unwrap();
        let outcome = controller.touch_cell(Position::new(2, 0)).unwrap();
        assert_eq!(
            outcome,
            TouchOutcome::MoveStarted {
                from: Position::ORIGIN,
                to: Position::new(2, 0),
                steps: 2
            }
        );

        // 50px cells, 5px steps: ten sub-steps per cell.
        for i in 1..=20 {
            assert_eq!(
                controller.tick().unwrap(),
                TickOutcome::Advanced(PixelOffset::new(5.0 * i as f32, 0.0))
            );
        }
        assert_eq!(controller.animation_offset(), Some(PixelOffset::new(100.0, 0.0)));

        let summary = run_to_completion(&mut controller);
        assert_eq!(summary.to, Position::new(2, 0));
        assert!(!controller.is_animating());
        assert!(controller.selected().is_none());
        assert_eq!(controller.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn landing_keeps_marble_identity() {
        let board = board_with(&[(4, 4, Color::Green)]);
        let id = board.get(Position::new(4, 4)).unwrap().id;
        let mut controller = controller().with_board(board);

        controller.touch_cell(Position::new(4, 4)).unwrap();
        controller.touch_cell(Position::new(4, 8)).unwrap();
        run_to_completion(&mut controller);

        assert_eq!(
            controller.board().find(id).map(|m| m.position),
            Some(Position::new(4, 8))
        );
    }

    #[test]
    fn scoreless_move_spawns_a_batch() {
        let mut controller = controller().with_board(board_with(&[(0, 0, Color::Red)]));
        controller.touch_cell(Position::ORIGIN).unwrap();
        controller.touch_cell(Position::new(1, 0)).unwrap();

        let summary = run_to_completion(&mut controller);

        assert_eq!(summary.spawned.len(), GameConfig::SPAWN_BATCH);
        assert_eq!(controller.board().len(), 1 + GameConfig::SPAWN_BATCH);
        assert!(!summary.game_over);
    }

    #[test]
    fn start_during_animation_resets_everything() {
        let mut controller = controller()
            .with_board(board_with(&[(0, 0, Color::Red), (9, 9, Color::Blue)]));
        controller.touch_cell(Position::ORIGIN).unwrap();
        controller.touch_cell(Position::new(0, 5)).unwrap();
        controller.tick().unwrap();
        assert!(controller.is_animating());

        controller.start().unwrap();

        assert!(!controller.is_animating());
        assert!(controller.selected().is_none());
        assert_eq!(controller.animation_offset(), None);
        assert_eq!(controller.board().len(), GameConfig::INITIAL_MARBLES);
        assert_eq!(controller.score(), 0);
        assert_eq!(controller.status(), GameStatus::Started);
        assert_eq!(controller.tick().unwrap(), TickOutcome::Idle);
    }

    #[test]
    fn fractional_board_touches_and_animates_by_drawn_cells() {
        let mut controller = TurnController::new(
            GameConfig::default(),
            Geometry::new(505).unwrap(),
            PcgRng::new(11),
        )
        .with_board(board_with(&[(4, 0, Color::Red)]));

        assert_eq!(
            controller.touch(252.0, 10.0).unwrap(),
            TouchOutcome::Selected(Position::new(4, 0))
        );
        assert!(matches!(
            controller.touch(503.0, 10.0).unwrap(),
            TouchOutcome::MoveStarted { steps: 5, .. }
        ));

        let mut last = None;
        while let TickOutcome::Advanced(offset) = controller.tick().unwrap() {
            last = Some(offset);
        }
        assert_eq!(last, Some(PixelOffset::new(252.5, 0.0)));
        assert!(controller.board().is_occupied(Position::new(9, 0)));
    }
}
