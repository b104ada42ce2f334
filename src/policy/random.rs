use rand::{Rng, rngs::StdRng};

use super::Policy;
use crate::generators::get_rng;
use crate::maze::Direction;
use crate::session::AvailableMoves;

/// Uniform random walker: picks any open direction, no memory.
///
/// The weakest baseline; mostly useful to sanity-check the harness and to
/// give the scoreboard a floor.
pub struct RandomWalk {
    rng: StdRng,
}

impl RandomWalk {
    pub fn new(seed: Option<u64>) -> Self {
        RandomWalk { rng: get_rng(seed) }
    }
}

impl Policy for RandomWalk {
    fn choose_move(
        &mut self,
        _position: (u16, u16),
        _collectible: Option<(u16, u16)>,
        moves: &AvailableMoves,
    ) -> Option<Direction> {
        let open: Vec<Direction> = moves.open_directions().collect();
        if open.is_empty() {
            // A sealed cell; only possible on corrupted grids
            return None;
        }
        Some(open[self.rng.random_range(0..open.len())])
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
