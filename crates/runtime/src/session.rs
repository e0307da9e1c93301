//! Session orchestrator.
//!
//! A [`Session`] owns one [`TurnController`] and connects it to the host:
//! touches and ticks come in, tick requests go out through the
//! [`FrameScheduler`], and every controller event is logged, handed to the
//! [`GameObserver`] and published on the [`EventBus`].

use tokio::sync::broadcast;

use lines_core::{
    Board, GameEvent, GameStatus, Geometry, Marble, MoveSummary, PixelOffset, TickOutcome,
    TouchOutcome, TurnController,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::observer::{GameObserver, NoopObserver};
use crate::rng::RuntimeRng;
use crate::scheduler::{FrameScheduler, ManualScheduler};

/// A running game wired to a host.
pub struct Session {
    controller: TurnController<RuntimeRng>,
    scheduler: Box<dyn FrameScheduler>,
    observer: Box<dyn GameObserver>,
    event_bus: EventBus,
    sequence: u64,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    // ===== observables =====

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn geometry(&self) -> &Geometry {
        self.controller.geometry()
    }

    pub fn score(&self) -> u32 {
        self.controller.score()
    }

    pub fn status(&self) -> GameStatus {
        self.controller.status()
    }

    pub fn is_animating(&self) -> bool {
        self.controller.is_animating()
    }

    pub fn selected(&self) -> Option<&Marble> {
        self.controller.selected()
    }

    pub fn animation_offset(&self) -> Option<PixelOffset> {
        self.controller.animation_offset()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    // ===== inputs =====

    /// Starts a new game, discarding any game in progress.
    pub fn start(&mut self) -> Result<()> {
        tracing::info!("Starting new game");
        let result = self.controller.start();
        self.dispatch();
        result.map_err(RuntimeError::from)
    }

    /// Delivers a pointer event in board pixel coordinates.
    pub fn touch(&mut self, px: f32, py: f32) -> Result<TouchOutcome> {
        let result = self.controller.touch(px, py);
        self.dispatch();
        let outcome = result?;

        match outcome {
            TouchOutcome::Ignored => {
                tracing::trace!("Touch at ({px}, {py}) ignored");
            }
            TouchOutcome::MoveStarted { .. } => self.scheduler.request_tick(),
            _ => {}
        }
        Ok(outcome)
    }

    /// Handles one tick signal from the host.
    pub fn on_tick(&mut self) -> Result<TickOutcome> {
        let result = self.controller.tick();
        self.dispatch();
        let outcome = result?;

        match &outcome {
            TickOutcome::Advanced(_) => self.scheduler.request_tick(),
            TickOutcome::Completed(summary) => {
                tracing::debug!(
                    "Move {} -> {} completed: {} points, {} spawned",
                    summary.from,
                    summary.to,
                    summary.points,
                    summary.spawned.len()
                );
            }
            TickOutcome::Idle => {}
        }
        Ok(outcome)
    }

    /// Ticks until the move in flight lands. Returns `None` if nothing was
    /// animating.
    pub fn run_until_idle(&mut self) -> Result<Option<MoveSummary>> {
        loop {
            match self.on_tick()? {
                TickOutcome::Advanced(_) => continue,
                TickOutcome::Completed(summary) => return Ok(Some(summary)),
                TickOutcome::Idle => return Ok(None),
            }
        }
    }

    fn dispatch(&mut self) {
        for event in self.controller.drain_events() {
            log_event(&event);

            self.observer.on_event(&event);
            match &event {
                GameEvent::ScoreChanged { total, .. } => self.observer.on_score_changed(*total),
                GameEvent::StatusChanged { status } => self.observer.on_game_state_changed(*status),
                _ => {}
            }

            self.event_bus.publish(Event {
                sequence: self.sequence,
                event,
            });
            self.sequence += 1;
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::StatusChanged { status } => {
            tracing::info!("Game {}", status);
        }
        GameEvent::ScoreChanged { total, gained } => {
            tracing::debug!("Score {} (+{})", total, gained);
        }
        GameEvent::MarbleSelected { marble, position } => {
            tracing::debug!("Selected marble {} at {}", marble, position);
        }
        GameEvent::MoveRejected { marble, from, to } => {
            tracing::debug!("No route for marble {} from {} to {}", marble, from, to);
        }
        GameEvent::MoveStarted {
            marble,
            from,
            to,
            steps,
        } => {
            tracing::info!("Moving marble {} from {} to {} ({} steps)", marble, from, to, steps);
        }
        GameEvent::MarbleMoved { marble, to, .. } => {
            tracing::debug!("Marble {} landed at {}", marble, to);
        }
        GameEvent::LineCleared {
            line,
            color,
            points,
            ..
        } => {
            tracing::info!("Cleared {} {} run for {} points", color, line, points);
        }
        GameEvent::MarblesSpawned { marbles } => {
            tracing::debug!(
                "Spawned {:?}",
                marbles
                    .iter()
                    .map(|marble| (marble.position.x, marble.position.y, marble.color.as_ref()))
                    .collect::<Vec<_>>()
            );
        }
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: RuntimeConfig,
    rng: Option<RuntimeRng>,
    board: Option<Board>,
    scheduler: Option<Box<dyn FrameScheduler>>,
    observer: Option<Box<dyn GameObserver>>,
    event_bus: Option<EventBus>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
            board: None,
            scheduler: None,
            observer: None,
            event_bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the spawner's random source. Defaults to one derived from
    /// the configured seed.
    pub fn rng(mut self, rng: RuntimeRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Resume play on a prepared board instead of waiting for a start.
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    pub fn scheduler(mut self, scheduler: impl FrameScheduler + 'static) -> Self {
        self.scheduler = Some(Box::new(scheduler));
        self
    }

    pub fn observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Share an existing bus. Defaults to a new one sized by the config.
    pub fn event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn build(self) -> Result<Session> {
        let board_pixels = self.config.board_pixels;
        let geometry =
            Geometry::new(board_pixels).map_err(|_| RuntimeError::InvalidGeometry { board_pixels })?;

        let rng = self
            .rng
            .unwrap_or_else(|| RuntimeRng::from_seed(self.config.seed));
        tracing::debug!(
            "Building session: {}px board, {}px cells, seeded: {}",
            board_pixels,
            geometry.cell_size(),
            rng.is_seeded()
        );

        let mut controller = TurnController::new(self.config.game_config, geometry, rng);
        if let Some(board) = self.board {
            controller = controller.with_board(board);
        }

        let mut session = Session {
            controller,
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Box::new(ManualScheduler::new())),
            observer: self.observer.unwrap_or_else(|| Box::new(NoopObserver)),
            event_bus: self
                .event_bus
                .unwrap_or_else(|| EventBus::with_capacity(self.config.event_capacity)),
            sequence: 0,
        };
        session.dispatch();
        Ok(session)
    }
}
