use rand::seq::SliceRandom;

use crate::error::MazeError;
use crate::generators::get_rng;
use crate::maze::{Direction, Grid};

struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(size: u32) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size as usize],
        }
    }

    /// Path-halving find. Iterative, so set chains on large grids cannot
    /// run into stack depth limits.
    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn unite(&mut self, x: u32, y: u32) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x as usize].cmp(&self.rank[root_y as usize]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y as usize] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x as usize] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y as usize] = root_x;
                self.rank[root_x as usize] += 1;
            }
        }
        true
    }
}

/// Wall between two adjacent cells that could be opened
#[derive(Clone, Copy)]
struct Edge {
    cell1: (u16, u16),
    cell2: (u16, u16),
}

/// Carve a perfect maze into `grid` with randomized Kruskal's algorithm.
///
/// Every candidate wall is shuffled once, then opened whenever its two
/// endpoint cells still belong to different sets. The loop stops as soon
/// as `width * height - 1` walls are open; the open walls then form a
/// spanning tree over the cells. A 1x1 grid terminates with zero walls
/// opened.
pub fn randomized_kruskal(grid: &mut Grid, seed: Option<u64>) -> Result<(), MazeError> {
    let width = grid.width();
    let height = grid.height();
    let total_cells = width as u32 * height as u32;

    // Initialize Union-Find for all cells
    let mut uf = UnionFind::new(total_cells);

    // Collect all candidate edges. Only east and south neighbors are
    // considered, so each adjacent pair shows up exactly once.
    let mut edges: Vec<Edge> = (0..height)
        .flat_map(|row| (0..width).map(move |col| (row, col)))
        .flat_map(|coord| {
            [Direction::East, Direction::South].map(|direction| {
                grid.adjacent(coord, direction).map(|neighbor| Edge {
                    cell1: coord,
                    cell2: neighbor,
                })
            })
        })
        .flatten()
        .collect();

    // Shuffle edges randomly
    let mut rng = get_rng(seed);
    edges.shuffle(&mut rng);

    let mut opened: u32 = 0;
    for edge in edges {
        // Spanning tree complete; every remaining edge would close a cycle
        if opened + 1 == total_cells {
            break;
        }

        // Convert cell coordinates to UnionFind indices
        let index1 = edge.cell1.0 as u32 * width as u32 + edge.cell1.1 as u32;
        let index2 = edge.cell2.0 as u32 * width as u32 + edge.cell2.1 as u32;

        // If the cells are not yet connected, open the wall between them
        if uf.unite(index1, index2) {
            grid.open_wall(edge.cell1, edge.cell2)?;
            opened += 1;
        }
    }

    Ok(())
}
