use super::cell::{Cell, Direction};
use crate::error::MazeError;

/// A fixed-size arena of maze cells, indexed by (row, column).
///
/// The grid owns every cell for its lifetime. Cells never reference each
/// other; adjacency is computed here from coordinates, so there are no
/// cyclic links to manage.
#[derive(Debug)]
pub struct Grid {
    cells: Box<[Cell]>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Allocate a `width` x `height` grid with every wall closed.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }
        let cells = vec![Cell::CLOSED; width as usize * height as usize].into_boxed_slice();
        Ok(Grid {
            cells,
            width,
            height,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    fn ravel_index(&self, (row, col): (u16, u16)) -> usize {
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        row as usize * self.width as usize + col as usize
    }

    pub fn in_bounds(&self, (row, col): (u16, u16)) -> bool {
        row < self.height && col < self.width
    }

    /// Look up a cell, failing for coordinates outside the grid.
    pub fn cell_at(&self, coord: (u16, u16)) -> Result<Cell, MazeError> {
        if !self.in_bounds(coord) {
            return Err(MazeError::OutOfBounds { coord });
        }
        Ok(self.cells[self.ravel_index(coord)])
    }

    /// The in-bounds coordinate one step from `coord` in `direction`,
    /// ignoring walls. `None` at the grid boundary.
    pub fn adjacent(&self, coord: (u16, u16), direction: Direction) -> Option<(u16, u16)> {
        if !self.in_bounds(coord) {
            return None;
        }
        let (row, col) = coord;
        let stepped = match direction {
            Direction::North => (row.checked_sub(1)?, col),
            Direction::South => (row.saturating_add(1), col),
            Direction::East => (row, col.saturating_add(1)),
            Direction::West => (row, col.checked_sub(1)?),
        };
        self.in_bounds(stepped).then_some(stepped)
    }

    /// The passable neighbor of `coord` in `direction`: in bounds AND the
    /// wall between them open. `None` is a normal query result, not an
    /// error — it means "you cannot walk that way".
    pub fn neighbor(&self, coord: (u16, u16), direction: Direction) -> Option<(u16, u16)> {
        let stepped = self.adjacent(coord, direction)?;
        self.cells[self.ravel_index(coord)]
            .is_open(direction)
            .then_some(stepped)
    }

    /// Open the wall between two grid-adjacent cells. Both cells mutate
    /// reciprocally: `a` gains the direction towards `b`, `b` gains its
    /// inverse. Opening an already-open wall is a no-op.
    pub fn open_wall(&mut self, a: (u16, u16), b: (u16, u16)) -> Result<(), MazeError> {
        let direction = Direction::ALL
            .into_iter()
            .find(|&d| self.adjacent(a, d) == Some(b))
            .ok_or(MazeError::NotAdjacent { a, b })?;
        let index_a = self.ravel_index(a);
        let index_b = self.ravel_index(b);
        self.cells[index_a].open(direction);
        self.cells[index_b].open(direction.inverse());
        Ok(())
    }

    /// Number of open-wall edges, each counted once.
    pub fn open_wall_count(&self) -> usize {
        let ends: usize = self.cells.iter().map(|c| c.open_count() as usize).sum();
        // Reciprocity means every open wall contributes two cell-side flags
        ends / 2
    }
}

impl std::ops::Index<(u16, u16)> for Grid {
    type Output = Cell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 4).unwrap_err(),
            MazeError::InvalidDimension {
                width: 0,
                height: 4
            }
        );
        assert_eq!(
            Grid::new(4, 0).unwrap_err(),
            MazeError::InvalidDimension {
                width: 4,
                height: 0
            }
        );
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = Grid::new(3, 2).unwrap();
        assert!(grid.cell_at((1, 2)).is_ok());
        assert_eq!(
            grid.cell_at((2, 0)).unwrap_err(),
            MazeError::OutOfBounds { coord: (2, 0) }
        );
    }

    #[test]
    fn test_adjacent_stops_at_boundary() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.adjacent((0, 0), Direction::North), None);
        assert_eq!(grid.adjacent((0, 0), Direction::West), None);
        assert_eq!(grid.adjacent((0, 0), Direction::South), Some((1, 0)));
        assert_eq!(grid.adjacent((2, 2), Direction::South), None);
        assert_eq!(grid.adjacent((2, 2), Direction::East), None);
    }

    #[test]
    fn test_open_wall_is_reciprocal() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_wall((1, 1), (1, 2)).unwrap();
        assert_eq!(grid.neighbor((1, 1), Direction::East), Some((1, 2)));
        assert_eq!(grid.neighbor((1, 2), Direction::West), Some((1, 1)));
        // The other sides stay walled
        assert_eq!(grid.neighbor((1, 1), Direction::West), None);
        assert_eq!(grid.neighbor((1, 2), Direction::East), None);
        assert_eq!(grid.open_wall_count(), 1);
    }

    #[test]
    fn test_open_wall_rejects_non_adjacent() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            grid.open_wall((0, 0), (0, 2)).unwrap_err(),
            MazeError::NotAdjacent {
                a: (0, 0),
                b: (0, 2)
            }
        );
        assert_eq!(
            grid.open_wall((0, 0), (1, 1)).unwrap_err(),
            MazeError::NotAdjacent {
                a: (0, 0),
                b: (1, 1)
            }
        );
        // Out-of-bounds endpoints are never adjacent to anything
        assert!(grid.open_wall((0, 0), (0, 3)).is_err());
        assert!(grid.open_wall((5, 5), (5, 6)).is_err());
    }

    #[test]
    fn test_neighbor_requires_open_wall() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.neighbor((0, 0), Direction::East), None);
        grid.open_wall((0, 0), (0, 1)).unwrap();
        assert_eq!(grid.neighbor((0, 0), Direction::East), Some((0, 1)));
    }
}
