mod backtrack;
mod random;
mod wall_follower;

pub use backtrack::Backtracker;
pub use random::RandomWalk;
pub use wall_follower::WallFollower;

use crate::maze::Direction;
use crate::session::{AvailableMoves, Session};

/// Default move budget for a run, matching the evaluation harness cap.
pub const DEFAULT_MAX_MOVES: usize = 2000;

/// A decision policy injected into the session loop.
///
/// The engine hands the policy exactly what it may observe: the agent's
/// position, the collectible's position if one exists, and the open-wall
/// flags around the agent. Returning `None` ends the run early, exactly as
/// if the move budget had been exhausted. The engine never loads policy
/// code dynamically; the harness constructs one and passes it in.
pub trait Policy {
    fn choose_move(
        &mut self,
        position: (u16, u16),
        collectible: Option<(u16, u16)>,
        moves: &AvailableMoves,
    ) -> Option<Direction>;

    /// Name used by the CLI and in batch reports.
    fn name(&self) -> &'static str;
}

/// How a driven run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The agent reached the end cell
    Completed,
    /// The policy returned `None` before the budget ran out
    PolicyStopped,
    /// The move budget ran out first
    MovesExhausted,
}

/// Drive `session` with `policy` for at most `max_moves` calls.
///
/// `on_step` runs after every move attempt, rejected ones included; the
/// interactive runner hangs its renderer on it.
pub fn run_policy(
    session: &mut Session,
    policy: &mut dyn Policy,
    max_moves: usize,
    mut on_step: impl FnMut(&Session),
) -> RunOutcome {
    for _ in 0..max_moves {
        if session.is_completed() {
            return RunOutcome::Completed;
        }
        let moves = session.available_moves();
        let Some(direction) = policy.choose_move(
            session.current_position(),
            session.collectible_position(),
            &moves,
        ) else {
            tracing::debug!("[run] policy {} stopped early", policy.name());
            return RunOutcome::PolicyStopped;
        };
        session.move_agent(direction);
        on_step(session);
    }
    if session.is_completed() {
        RunOutcome::Completed
    } else {
        tracing::debug!("[run] move budget of {} exhausted", max_moves);
        RunOutcome::MovesExhausted
    }
}

/// Look up a shipped policy by its CLI name.
pub fn by_name(name: &str, seed: Option<u64>) -> Option<Box<dyn Policy>> {
    match name {
        "random" => Some(Box::new(RandomWalk::new(seed))),
        "wall-follower" => Some(Box::new(WallFollower::new())),
        "backtrack" => Some(Box::new(Backtracker::new())),
        _ => None,
    }
}

/// Coordinate one step from `position`, ignoring walls and bounds above
/// zero. Policies use this to reason about cells they have already seen.
pub(crate) fn step(position: (u16, u16), direction: Direction) -> Option<(u16, u16)> {
    let (dr, dc) = direction.delta();
    let row = position.0 as i32 + dr;
    let col = position.1 as i32 + dc;
    (row >= 0 && col >= 0).then(|| (row as u16, col as u16))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Grid, Maze};
    use crate::session::ScorePreset;

    fn corridor_session() -> Session {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.open_wall((0, 0), (0, 1)).unwrap();
        grid.open_wall((0, 1), (0, 2)).unwrap();
        let maze = Maze::from_parts(grid, (0, 0), (0, 2)).unwrap();
        Session::with_collectible(maze, ScorePreset::Basic, None).unwrap()
    }

    struct AlwaysEast;
    impl Policy for AlwaysEast {
        fn choose_move(
            &mut self,
            _position: (u16, u16),
            _collectible: Option<(u16, u16)>,
            _moves: &AvailableMoves,
        ) -> Option<Direction> {
            Some(Direction::East)
        }
        fn name(&self) -> &'static str {
            "always-east"
        }
    }

    struct GiveUp;
    impl Policy for GiveUp {
        fn choose_move(
            &mut self,
            _position: (u16, u16),
            _collectible: Option<(u16, u16)>,
            _moves: &AvailableMoves,
        ) -> Option<Direction> {
            None
        }
        fn name(&self) -> &'static str {
            "give-up"
        }
    }

    #[test]
    fn test_run_completes_and_counts_steps() {
        let mut session = corridor_session();
        let mut steps = 0;
        let outcome = run_policy(&mut session, &mut AlwaysEast, 10, |_| steps += 1);
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(session.moves_taken(), 2);
        assert_eq!(steps, 2);
    }

    #[test]
    fn test_none_terminates_early() {
        let mut session = corridor_session();
        let outcome = run_policy(&mut session, &mut GiveUp, 10, |_| {});
        assert_eq!(outcome, RunOutcome::PolicyStopped);
        assert_eq!(session.moves_taken(), 0);
    }

    #[test]
    fn test_budget_exhaustion() {
        let mut session = corridor_session();
        let outcome = run_policy(&mut session, &mut AlwaysEast, 1, |_| {});
        assert_eq!(outcome, RunOutcome::MovesExhausted);
        assert_eq!(session.moves_taken(), 1);
    }

    #[test]
    fn test_by_name_lookup() {
        assert!(by_name("random", Some(1)).is_some());
        assert!(by_name("wall-follower", None).is_some());
        assert!(by_name("backtrack", None).is_some());
        assert!(by_name("psychic", None).is_none());
    }
}
