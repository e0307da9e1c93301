//! Host callbacks for state changes.
use lines_core::{GameEvent, GameStatus};

/// Receives every event a session dispatches. All methods default to no-ops.
pub trait GameObserver {
    fn on_score_changed(&mut self, _total: u32) {}

    fn on_game_state_changed(&mut self, _status: GameStatus) {}

    /// Called for every event, before the specific callbacks above.
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}
