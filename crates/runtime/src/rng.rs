//! Random sources a session can spawn marbles with.
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use lines_core::{PcgRng, RngOracle};

/// Spawner randomness: reproducible when seeded, OS entropy otherwise.
#[derive(Clone, Debug)]
pub enum RuntimeRng {
    Seeded(PcgRng),
    Entropy(StdRng),
}

impl RuntimeRng {
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(PcgRng::new(seed)),
            None => Self::Entropy(StdRng::from_entropy()),
        }
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded(_))
    }
}

impl RngOracle for RuntimeRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Seeded(rng) => rng.next_u32(),
            Self::Entropy(rng) => RngCore::next_u32(rng),
        }
    }

    fn below(&mut self, bound: u32) -> u32 {
        match self {
            Self::Seeded(rng) => rng.below(bound),
            Self::Entropy(_) if bound <= 1 => 0,
            Self::Entropy(rng) => rng.gen_range(0..bound),
        }
    }
}
