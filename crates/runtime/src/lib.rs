//! Host runtime for the marble lines puzzle.
//!
//! This crate wraps the rules in `lines-core` into a [`Session`] that a UI
//! (or the `lines-autoplay` binary) can drive with pixel touches and tick
//! signals, and fans controller events out to observers and subscribers.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`config`] reads host settings from the environment
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`scheduler`] and [`observer`] are the host-facing seams
//! - [`autoplay`] plays random legal moves
pub mod autoplay;
pub mod config;
pub mod error;
pub mod events;
pub mod observer;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use autoplay::{AutoplayConfig, AutoplayReport};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use observer::{GameObserver, NoopObserver};
pub use rng::RuntimeRng;
pub use scheduler::{FrameScheduler, ManualScheduler};
pub use session::{Session, SessionBuilder};
