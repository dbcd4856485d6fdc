use crate::board::Move;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seedable candidate shuffle. Kept apart from the search so that a
/// searcher built without a seed explores moves in enumeration order and
/// stays deterministic.
#[derive(Clone, Debug)]
pub struct MoveShuffler {
    rng: SmallRng,
}

impl MoveShuffler {
    pub fn new(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn shuffle(&mut self, moves: &mut [Move]) {
        moves.shuffle(&mut self.rng);
    }
}
