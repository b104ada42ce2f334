use std::collections::HashSet;

use super::{Policy, step};
use crate::maze::Direction;
use crate::session::AvailableMoves;

/// Trémaux-style depth-first walker.
///
/// Advances into any open neighbor it has not stood on yet; at a dead end
/// it retreats along its own trail one step at a time. Visits every cell
/// at most twice, so it completes any perfect maze within `2 * cells`
/// moves.
pub struct Backtracker {
    visited: HashSet<(u16, u16)>,
    /// Forward moves taken since the start, newest last
    trail: Vec<Direction>,
}

impl Backtracker {
    pub fn new() -> Self {
        Backtracker {
            visited: HashSet::new(),
            trail: Vec::new(),
        }
    }
}

impl Default for Backtracker {
    fn default() -> Self {
        Backtracker::new()
    }
}

impl Policy for Backtracker {
    fn choose_move(
        &mut self,
        position: (u16, u16),
        _collectible: Option<(u16, u16)>,
        moves: &AvailableMoves,
    ) -> Option<Direction> {
        self.visited.insert(position);

        for direction in moves.open_directions() {
            let Some(target) = step(position, direction) else {
                continue;
            };
            if !self.visited.contains(&target) {
                self.trail.push(direction);
                return Some(direction);
            }
        }

        // Dead end: retrace the last forward move. An empty trail means the
        // whole reachable component is explored; give up.
        self.trail.pop().map(Direction::inverse)
    }

    fn name(&self) -> &'static str {
        "backtrack"
    }
}
