pub mod cell;
pub mod grid;

pub use cell::{Cell, Direction};
pub use grid::Grid;

use crate::error::MazeError;
use crate::generators::randomized_kruskal;

/// A carved grid plus its designated start and end cells.
///
/// Generation establishes the spanning-tree invariant: the open walls
/// connect every cell, acyclically, with exactly `width * height - 1`
/// edges, so any two cells are joined by exactly one simple path.
#[derive(Debug)]
pub struct Maze {
    grid: Grid,
    start: (u16, u16),
    end: (u16, u16),
}

impl Maze {
    /// Generate a perfect maze with randomized Kruskal carving.
    ///
    /// Start is the top-left cell, end the bottom-right, the same opposite
    /// corners an agent run begins and ends on. Pass a seed to make the
    /// layout reproducible.
    pub fn generate(width: u16, height: u16, seed: Option<u64>) -> Result<Maze, MazeError> {
        let mut grid = Grid::new(width, height)?;
        randomized_kruskal(&mut grid, seed)?;
        let end = (height - 1, width - 1);
        Ok(Maze {
            grid,
            start: (0, 0),
            end,
        })
    }

    /// Wrap an already-carved grid with explicit start and end cells.
    /// Used by the maze loader; the grid is taken as-is, walls included.
    pub fn from_parts(
        grid: Grid,
        start: (u16, u16),
        end: (u16, u16),
    ) -> Result<Maze, MazeError> {
        for coord in [start, end] {
            if !grid.in_bounds(coord) {
                return Err(MazeError::OutOfBounds { coord });
            }
        }
        Ok(Maze { grid, start, end })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> (u16, u16) {
        self.start
    }

    pub fn end(&self) -> (u16, u16) {
        self.end
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_picks_opposite_corners() {
        let maze = Maze::generate(6, 4, Some(7)).unwrap();
        assert_eq!(maze.start(), (0, 0));
        assert_eq!(maze.end(), (3, 5));
    }

    #[test]
    fn test_from_parts_checks_bounds() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            Maze::from_parts(grid, (0, 0), (3, 0)).unwrap_err(),
            MazeError::OutOfBounds { coord: (3, 0) }
        );
    }

    #[test]
    fn test_one_by_one_maze() {
        let maze = Maze::generate(1, 1, Some(0)).unwrap();
        assert_eq!(maze.start(), maze.end());
        assert_eq!(maze.grid().open_wall_count(), 0);
    }
}
