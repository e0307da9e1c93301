//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use lines_core::GameEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Game started or ended
    Game,
    /// Score updates
    Score,
    /// Selections, moves, clears and spawns
    Board,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Game, Topic::Score, Topic::Board];

    /// Topic a controller event is published on.
    pub fn of(event: &GameEvent) -> Self {
        match event {
            GameEvent::StatusChanged { .. } => Topic::Game,
            GameEvent::ScoreChanged { .. } => Topic::Score,
            GameEvent::MarbleSelected { .. }
            | GameEvent::MoveRejected { .. }
            | GameEvent::MoveStarted { .. }
            | GameEvent::MarbleMoved { .. }
            | GameEvent::LineCleared { .. }
            | GameEvent::MarblesSpawned { .. } => Topic::Board,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Topic::Game => 0,
            Topic::Score => 1,
            Topic::Board => 2,
        }
    }
}

/// A published event with its position in the session-wide sequence, so
/// subscribers of several topics can restore the publishing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub sequence: u64,
    pub event: GameEvent,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.event)
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Delivery is best-effort: slow receivers lag and
/// publishing with no subscribers drops the event.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 3]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels = Topic::ALL.map(|_| broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.slot()].send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.slot()].subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels[topic.slot()].receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
