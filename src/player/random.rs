use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::{BoardCapability, PASS_ACTION};
use crate::player::ActionSource;

/// Autonomous source: uniform-random legal move, pass when there is none.
/// Never blocks.
pub struct RandomSource {
    name: String,
    rng: StdRng,
}

impl RandomSource {
    pub fn new(name: &str) -> Self {
        RandomSource {
            name: name.to_string(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic variant for reproducible episodes.
    pub fn seeded(name: &str, seed: u64) -> Self {
        RandomSource {
            name: name.to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ActionSource for RandomSource {
    fn next_action(&mut self, board: &dyn BoardCapability) -> Option<usize> {
        let legal = board.legal_moves();
        Some(legal.choose(&mut self.rng).copied().unwrap_or(PASS_ACTION))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
