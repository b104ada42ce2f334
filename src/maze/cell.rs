use std::fmt;
use std::str::FromStr;

use crate::error::MazeError;

/// One of the four cardinal directions an agent can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The opposite direction: N↔S, E↔W.
    pub fn inverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Unit displacement as (row delta, column delta). Rows grow southward,
    /// columns grow eastward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// The textual label used at the policy and file boundaries.
    pub fn label(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::South => "SOUTH",
            Direction::East => "EAST",
            Direction::West => "WEST",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::North => 1 << 0,
            Direction::South => 1 << 1,
            Direction::East => 1 << 2,
            Direction::West => 1 << 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORTH" => Ok(Direction::North),
            "SOUTH" => Ok(Direction::South),
            "EAST" => Ok(Direction::East),
            "WEST" => Ok(Direction::West),
            _ => Err(MazeError::InvalidDirection(s.to_string())),
        }
    }
}

/// A single maze cell: the set of directions whose walls have been opened.
///
/// A fresh cell has every wall closed. Walls are only ever opened through
/// [`Grid::open_wall`](super::Grid::open_wall), which keeps the set
/// reciprocal with the neighboring cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    open: u8,
}

impl Cell {
    pub const CLOSED: Cell = Cell { open: 0 };

    /// Whether the wall in `direction` has been opened.
    pub fn is_open(self, direction: Direction) -> bool {
        self.open & direction.bit() != 0
    }

    pub(super) fn open(&mut self, direction: Direction) {
        self.open |= direction.bit();
    }

    /// Directions with an opened wall, in N/S/E/W order.
    pub fn open_directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.is_open(*d))
    }

    /// Number of opened walls on this cell.
    pub fn open_count(self) -> u32 {
        self.open.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.inverse().inverse(), direction);
        }
    }

    #[test]
    fn test_delta_cancels_with_inverse() {
        for direction in Direction::ALL {
            let (dr, dc) = direction.delta();
            let (ir, ic) = direction.inverse().delta();
            assert_eq!((dr + ir, dc + ic), (0, 0));
        }
    }

    #[test]
    fn test_label_parse_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.label().parse::<Direction>(), Ok(direction));
        }
        assert_eq!(
            "UP".parse::<Direction>(),
            Err(MazeError::InvalidDirection("UP".to_string()))
        );
    }

    #[test]
    fn test_cell_starts_closed() {
        let cell = Cell::CLOSED;
        assert_eq!(cell.open_count(), 0);
        assert!(Direction::ALL.iter().all(|d| !cell.is_open(*d)));
    }

    #[test]
    fn test_cell_open_is_idempotent() {
        let mut cell = Cell::CLOSED;
        cell.open(Direction::East);
        cell.open(Direction::East);
        assert_eq!(cell.open_count(), 1);
        assert!(cell.is_open(Direction::East));
        assert_eq!(
            cell.open_directions().collect::<Vec<_>>(),
            vec![Direction::East]
        );
    }
}
