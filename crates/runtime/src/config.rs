//! Host configuration read from the environment.
use std::env;

use lines_core::GameConfig;

/// Settings for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Width and height of the square drawing surface, in pixels.
    pub board_pixels: u32,
    /// Fixed seed for the spawner. `None` draws entropy from the OS.
    pub seed: Option<u64>,
    /// Buffered events per event bus topic.
    pub event_capacity: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_BOARD_PIXELS: u32 = 500;
    pub const DEFAULT_EVENT_CAPACITY: usize = 100;

    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LINES_BOARD_PIXELS` - Board width in pixels (default: 500)
    /// - `LINES_ANIMATION_STEP` - Pixels per animation tick (default: 5, min: 1)
    /// - `LINES_SEED` - Spawner seed (default: OS entropy)
    /// - `LINES_EVENT_CAPACITY` - Per-topic event buffer (default: 100, min: 1)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(pixels) = parse(&lookup, "LINES_BOARD_PIXELS") {
            config.board_pixels = pixels;
        }
        if let Some(step) = parse(&lookup, "LINES_ANIMATION_STEP") {
            config.game_config = GameConfig::with_animation_step(step);
        }
        if let Some(seed) = parse(&lookup, "LINES_SEED") {
            config.seed = Some(seed);
        }
        if let Some(capacity) = parse::<usize>(&lookup, "LINES_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_board_pixels(mut self, board_pixels: u32) -> Self {
        self.board_pixels = board_pixels;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            board_pixels: Self::DEFAULT_BOARD_PIXELS,
            seed: None,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
        }
    }
}

pub(crate) fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
