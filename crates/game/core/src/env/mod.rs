//! Environment consumed by the rules.
//!
//! The only outside input the rules need beyond pointer events and ticks is
//! randomness for marble placement, exposed through [`RngOracle`].
mod rng;

pub use rng::{PcgRng, RngOracle};
