use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::error::MazeError;
use crate::maze::{Direction, Grid};

/// Shortest path between two cells, walking through open walls only.
///
/// Uniform-cost search: each traversable edge costs 1, so this is Dijkstra
/// with a priority queue keyed by accumulated cost. On a generated maze the
/// path is unique (spanning tree), so frontier tie-breaking cannot change
/// the result; on loaded grids it can only pick among equal-length paths.
///
/// Returns the inclusive cell sequence from `start` to `goal` and its cost,
/// which is always `sequence length - 1`. A goal with no route to it
/// surfaces [`MazeError::Unreachable`] — never an empty path with cost 0.
pub fn shortest_path(
    grid: &Grid,
    start: (u16, u16),
    goal: (u16, u16),
) -> Result<(Vec<(u16, u16)>, usize), MazeError> {
    grid.cell_at(start)?;
    grid.cell_at(goal)?;

    // Priority queue for Dijkstra's algorithm
    // Using Reverse to turn the max-heap into a min-heap
    let mut frontier: BinaryHeap<Reverse<(usize, (u16, u16))>> = BinaryHeap::new();
    frontier.push(Reverse((0, start)));

    // Cheapest known cost to reach each cell, and the cell it was reached from
    let mut costs: HashMap<(u16, u16), usize> = HashMap::from([(start, 0)]);
    let mut parents: HashMap<(u16, u16), (u16, u16)> = HashMap::new();

    while let Some(Reverse((cost, coord))) = frontier.pop() {
        if coord == goal {
            return Ok((walk_back(&parents, goal), cost));
        }

        // Skip frontier entries made stale by a cheaper route found later
        if costs.get(&coord).is_some_and(|&best| cost > best) {
            continue;
        }

        let next_cost = cost + 1; // Uniform cost for each step
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor(coord, direction) else {
                continue;
            };
            let is_cheaper = match costs.get(&neighbor) {
                Some(&existing) => next_cost < existing,
                None => true,
            };
            if is_cheaper {
                costs.insert(neighbor, next_cost);
                parents.insert(neighbor, coord);
                frontier.push(Reverse((next_cost, neighbor)));
            }
        }
    }

    Err(MazeError::Unreachable {
        from: start,
        to: goal,
    })
}

/// Follow the parent chain from `goal` back to the search root.
fn walk_back(
    parents: &HashMap<(u16, u16), (u16, u16)>,
    goal: (u16, u16),
) -> Vec<(u16, u16)> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&parent) = parents.get(&current) {
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

/// |Δrow| + |Δcolumn| between two coordinates, ignoring walls.
pub fn manhattan_distance(a: (u16, u16), b: (u16, u16)) -> u32 {
    (a.0 as i32 - b.0 as i32).unsigned_abs() + (a.1 as i32 - b.1 as i32).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::randomized_kruskal;

    #[test]
    fn test_single_cell_path() {
        let mut grid = Grid::new(1, 1).unwrap();
        randomized_kruskal(&mut grid, Some(0)).unwrap();
        let (path, cost) = shortest_path(&grid, (0, 0), (0, 0)).unwrap();
        assert_eq!(path, vec![(0, 0)]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_cost_is_sequence_length_minus_one() {
        let mut grid = Grid::new(10, 10).unwrap();
        randomized_kruskal(&mut grid, Some(21)).unwrap();
        let (path, cost) = shortest_path(&grid, (0, 0), (9, 9)).unwrap();
        assert_eq!(cost, path.len() - 1);
        assert_eq!(path.first(), Some(&(0, 0)));
        assert_eq!(path.last(), Some(&(9, 9)));
        // Consecutive cells are passable neighbors
        for pair in path.windows(2) {
            assert!(
                Direction::ALL
                    .into_iter()
                    .any(|d| grid.neighbor(pair[0], d) == Some(pair[1]))
            );
        }
    }

    #[test]
    fn test_path_length_is_symmetric() {
        let mut grid = Grid::new(12, 8).unwrap();
        randomized_kruskal(&mut grid, Some(5)).unwrap();
        let (there, cost_there) = shortest_path(&grid, (0, 0), (7, 11)).unwrap();
        let (back, cost_back) = shortest_path(&grid, (7, 11), (0, 0)).unwrap();
        assert_eq!(cost_there, cost_back);
        // Spanning tree: the unique path is the same cells, reversed
        let mut reversed = back.clone();
        reversed.reverse();
        assert_eq!(there, reversed);
    }

    #[test]
    fn test_unreachable_is_distinct_from_empty() {
        // Walls never opened: two cells with no route between them
        let grid = Grid::new(2, 1).unwrap();
        assert_eq!(
            shortest_path(&grid, (0, 0), (0, 1)).unwrap_err(),
            MazeError::Unreachable {
                from: (0, 0),
                to: (0, 1)
            }
        );
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(
            shortest_path(&grid, (0, 0), (2, 2)).unwrap_err(),
            MazeError::OutOfBounds { coord: (2, 2) }
        );
    }

    #[test]
    fn test_manhattan_ignores_walls() {
        assert_eq!(manhattan_distance((0, 0), (3, 4)), 7);
        assert_eq!(manhattan_distance((3, 4), (0, 0)), 7);
        assert_eq!(manhattan_distance((2, 2), (2, 2)), 0);
    }
}
