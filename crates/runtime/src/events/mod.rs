//! Topic-based event bus for session events.
//!
//! Controller events are published to the topic they concern, and consumers
//! subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
