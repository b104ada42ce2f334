use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::error::MazeError;
use crate::generators::get_rng;
use crate::maze::{Direction, Maze};
use crate::pathfind::{manhattan_distance, shortest_path};

/// Which scoring formula a session reports. The two presets match the two
/// historical harness variants; nothing else about the engine differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePreset {
    /// `10000 - 100 * manhattan(current, end) - 10 * excess moves`
    #[default]
    Basic,
    /// [`Basic`](ScorePreset::Basic) plus 500 for capturing the collectible,
    /// minus one point per visited cell.
    ExplorationWithCollectible,
}

/// Per-direction open flags around the agent, as handed to a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableMoves {
    open: [bool; 4],
}

impl AvailableMoves {
    /// Whether the wall in `direction` is open from the agent's cell.
    pub fn is_open(&self, direction: Direction) -> bool {
        self.open[direction as usize]
    }

    /// The directions the agent can actually walk, in N/S/E/W order.
    pub fn open_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_open(*d))
    }
}

/// Snapshot of a session's scoreboard. The batch harness averages these
/// across runs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionStats {
    pub visited_cells: usize,
    pub num_moves: usize,
    pub goal_reached: bool,
    pub cherry_captured: bool,
    pub score: i64,
    pub explorer_score: i64,
}

/// One agent traversal over one maze.
///
/// The session owns its maze exclusively and is mutated only through
/// [`move_agent`](Session::move_agent). The optimal route is computed once
/// at construction and never touched again. Once the agent reaches the end
/// cell the session is terminal: no operation transitions out of it.
#[derive(Debug)]
pub struct Session {
    maze: Maze,
    /// Inclusive start-to-end cell sequence, fixed at construction
    shortest_path: Vec<(u16, u16)>,
    agent: (u16, u16),
    visited: HashSet<(u16, u16)>,
    cherry: Option<(u16, u16)>,
    cherry_captured: bool,
    moves_taken: usize,
    goal_reached: bool,
    preset: ScorePreset,
}

impl Session {
    /// Start a session over `maze`, placing the collectible uniformly at
    /// random on a cell that is neither start nor end.
    pub fn new(maze: Maze, preset: ScorePreset, seed: Option<u64>) -> Result<Self, MazeError> {
        let cherry = place_cherry(&maze, seed);
        Session::with_collectible(maze, preset, cherry)
    }

    /// Start a session with a pre-chosen collectible cell, or none.
    /// Loaded mazes restore theirs from the file through this path.
    pub fn with_collectible(
        maze: Maze,
        preset: ScorePreset,
        cherry: Option<(u16, u16)>,
    ) -> Result<Self, MazeError> {
        if let Some(coord) = cherry {
            maze.grid().cell_at(coord)?;
        }
        // Recomputed from the walls every time; a loaded file's idea of the
        // optimal length is never trusted
        let (path, _) = shortest_path(maze.grid(), maze.start(), maze.end())?;

        let agent = maze.start();
        let goal_reached = agent == maze.end();
        tracing::debug!(
            "[session] starting {}x{} maze, optimal route {} moves",
            maze.width(),
            maze.height(),
            path.len() - 1
        );
        Ok(Session {
            agent,
            visited: HashSet::from([agent]),
            cherry,
            cherry_captured: false,
            moves_taken: 0,
            goal_reached,
            preset,
            shortest_path: path,
            maze,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The agent's coordinate. No side effect.
    pub fn current_position(&self) -> (u16, u16) {
        self.agent
    }

    /// Open-wall flags for each of the four directions from the agent's
    /// cell. Pure query.
    pub fn available_moves(&self) -> AvailableMoves {
        let cell = self.maze.grid()[self.agent];
        AvailableMoves {
            open: Direction::ALL.map(|d| cell.is_open(d)),
        }
    }

    pub fn collectible_position(&self) -> Option<(u16, u16)> {
        self.cherry
    }

    pub fn captured(&self) -> bool {
        self.cherry_captured
    }

    /// True once the agent has reached the end cell. Terminal.
    pub fn is_completed(&self) -> bool {
        self.goal_reached
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn has_visited(&self, coord: (u16, u16)) -> bool {
        self.visited.contains(&coord)
    }

    pub fn moves_taken(&self) -> usize {
        self.moves_taken
    }

    /// Number of cells on the precomputed optimal route, start and end
    /// inclusive.
    pub fn shortest_path_len(&self) -> usize {
        self.shortest_path.len()
    }

    /// Attempt to move the agent one cell.
    ///
    /// Calls after the session completed are no-ops: position and counter
    /// stay untouched, `false` comes back. Before that, every call counts
    /// as a move, rejected ones included, so the counter's final increment
    /// lands on the completing move itself.
    pub fn move_agent(&mut self, direction: Direction) -> bool {
        if self.goal_reached {
            return false;
        }
        self.moves_taken += 1;

        let Some(next) = self.maze.grid().neighbor(self.agent, direction) else {
            tracing::debug!("[session] cannot move {direction}, wall is blocking the way");
            return false;
        };

        self.agent = next;
        self.visited.insert(next);

        if next == self.maze.end() {
            self.goal_reached = true;
            tracing::debug!("[session] goal reached in {} moves", self.moves_taken);
        }
        if !self.cherry_captured && self.cherry == Some(next) {
            self.cherry_captured = true;
            tracing::debug!("[session] collectible captured at {:?}", next);
        }
        true
    }

    /// Score of the traversal so far, per the session's preset. Computed on
    /// demand, never cached.
    ///
    /// Starts from 10000 and subtracts 100 per cell of straight-line
    /// distance left to the end and 10 per move beyond the optimal count.
    /// The exploration preset then adds 500 for a captured collectible and
    /// subtracts one point per visited cell.
    pub fn score(&self) -> i64 {
        let distance = manhattan_distance(self.agent, self.maze.end()) as i64;
        let optimal = self.shortest_path.len() as i64 - 1;
        let excess = (self.moves_taken as i64 - optimal).max(0);
        let base = 10_000 - 100 * distance - 10 * excess;
        match self.preset {
            ScorePreset::Basic => base,
            ScorePreset::ExplorationWithCollectible => {
                base + 500 * self.cherry_captured as i64 - self.visited.len() as i64
            }
        }
    }

    /// Secondary metric: rewards coverage, charges for moves.
    pub fn explorer_score(&self) -> i64 {
        self.visited.len() as i64 * 10 - self.moves_taken as i64
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            visited_cells: self.visited.len(),
            num_moves: self.moves_taken,
            goal_reached: self.goal_reached,
            cherry_captured: self.cherry_captured,
            score: self.score(),
            explorer_score: self.explorer_score(),
        }
    }
}

/// Pick a collectible cell that is neither start nor end. Mazes with no
/// such cell (1x1 and the two-cell strips) get no collectible; the
/// rejection loop would never terminate on them.
fn place_cherry(maze: &Maze, seed: Option<u64>) -> Option<(u16, u16)> {
    if maze.grid().len() <= 2 {
        return None;
    }
    let mut rng = get_rng(seed);
    loop {
        let coord = (
            rng.random_range(0..maze.height()),
            rng.random_range(0..maze.width()),
        );
        if coord != maze.start() && coord != maze.end() {
            return Some(coord);
        }
    }
}
