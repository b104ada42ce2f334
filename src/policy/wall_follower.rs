use super::Policy;
use crate::maze::Direction;
use crate::session::AvailableMoves;

/// Right-hand-rule walker: keep a hand on the right wall.
///
/// At every cell it tries, relative to its current heading: right turn,
/// straight on, left turn, then about-face. On a perfect maze (the open
/// walls form a tree) this always reaches the end cell eventually.
pub struct WallFollower {
    heading: Direction,
}

impl WallFollower {
    pub fn new() -> Self {
        // Mazes start in the top-left corner, so face into the grid
        WallFollower {
            heading: Direction::South,
        }
    }
}

impl Default for WallFollower {
    fn default() -> Self {
        WallFollower::new()
    }
}

fn right_of(direction: Direction) -> Direction {
    match direction {
        Direction::North => Direction::East,
        Direction::East => Direction::South,
        Direction::South => Direction::West,
        Direction::West => Direction::North,
    }
}

impl Policy for WallFollower {
    fn choose_move(
        &mut self,
        _position: (u16, u16),
        _collectible: Option<(u16, u16)>,
        moves: &AvailableMoves,
    ) -> Option<Direction> {
        let right = right_of(self.heading);
        let left = right.inverse();
        let back = self.heading.inverse();
        [right, self.heading, left, back]
            .into_iter()
            .find(|&candidate| moves.is_open(candidate))
            .inspect(|&chosen| self.heading = chosen)
    }

    fn name(&self) -> &'static str {
        "wall-follower"
    }
}
