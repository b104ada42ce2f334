use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MazeError;
use crate::maze::{Direction, Grid, Maze};

/// Failures while reading or writing maze files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("maze file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("maze file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// On-disk maze record.
///
/// `open_walls` lists every reciprocally-open wall exactly once as a
/// `[[r1,c1],[r2,c2]]` pair with the numerically smaller coordinate first.
/// The record deliberately carries no path length; a loaded maze gets its
/// shortest path recomputed from the walls.
#[derive(Debug, Serialize, Deserialize)]
struct MazeFile {
    width: u16,
    height: u16,
    open_walls: Vec<[[u16; 2]; 2]>,
    start: [u16; 2],
    end: [u16; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cherry: Option<[u16; 2]>,
}

/// Write `maze` and its collectible, if any, to `path` as JSON. Parent
/// directories are created as needed.
pub fn export(maze: &Maze, cherry: Option<(u16, u16)>, path: &Path) -> Result<(), StoreError> {
    let grid = maze.grid();
    let mut open_walls = Vec::with_capacity(grid.len().saturating_sub(1));
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            // Sweeping east and south only lists each wall once, smaller
            // coordinate first
            for direction in [Direction::East, Direction::South] {
                if let Some(neighbor) = grid.neighbor((row, col), direction) {
                    open_walls.push([[row, col], [neighbor.0, neighbor.1]]);
                }
            }
        }
    }

    let record = MazeFile {
        width: grid.width(),
        height: grid.height(),
        open_walls,
        start: [maze.start().0, maze.start().1],
        end: [maze.end().0, maze.end().1],
        cherry: cherry.map(|c| [c.0, c.1]),
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, &record)?;
    tracing::debug!("[store] exported maze to {}", path.display());
    Ok(())
}

/// Read a maze back from `path`, replaying `open_wall` for every listed
/// pair. Corrupt records surface the underlying [`MazeError`]
/// (`OutOfBounds`, `NotAdjacent`) instead of producing a broken grid.
pub fn load(path: &Path) -> Result<(Maze, Option<(u16, u16)>), StoreError> {
    let bytes = fs::read(path)?;
    let record: MazeFile = serde_json::from_slice(&bytes)?;

    let mut grid = Grid::new(record.width, record.height)?;
    for [a, b] in &record.open_walls {
        grid.open_wall((a[0], a[1]), (b[0], b[1]))?;
    }
    let maze = Maze::from_parts(
        grid,
        (record.start[0], record.start[1]),
        (record.end[0], record.end[1]),
    )?;
    tracing::debug!("[store] loaded {}x{} maze from {}", maze.width(), maze.height(), path.display());
    Ok((maze, record.cherry.map(|c| (c[0], c[1]))))
}
