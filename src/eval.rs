use std::sync::mpsc;
use std::thread;

use serde::Serialize;

use crate::error::MazeError;
use crate::maze::Maze;
use crate::policy::{DEFAULT_MAX_MOVES, Policy, run_policy};
use crate::session::{ScorePreset, Session, SessionStats};

/// Salts so the maze layout, cherry placement, and policy randomness of one
/// run draw from unrelated streams
const CHERRY_SALT: u64 = 0x9e3779b97f4a7c15;
const POLICY_SALT: u64 = 0xd1b54a32d192ed03;

/// Configuration for a batch evaluation sweep.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub width: u16,
    pub height: u16,
    pub runs: usize,
    pub preset: ScorePreset,
    pub max_moves: usize,
    /// Base seed; run `i` derives its maze, cherry, and policy seeds from
    /// `base + i`, so a batch is reproducible end to end
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            width: 20,
            height: 20,
            runs: 1000,
            preset: ScorePreset::ExplorationWithCollectible,
            max_moves: DEFAULT_MAX_MOVES,
            seed: 0,
        }
    }
}

/// Averages over a finished batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub runs: usize,
    pub avg_score: f64,
    pub avg_explorer_score: f64,
    pub avg_moves: f64,
    pub avg_visited: f64,
    pub completion_rate: f64,
    pub capture_rate: f64,
}

/// Run `config.runs` independent sessions and average their stats.
///
/// Runs are striped across worker threads. Each run owns its maze,
/// session, and RNGs outright; workers share nothing but the result
/// channel, so there is no locking anywhere. Dropping the report receiver
/// is the only cancellation there is — sessions hold no resources worth
/// releasing.
pub fn run_batch(
    config: &BatchConfig,
    make_policy: impl Fn(Option<u64>) -> Box<dyn Policy> + Sync,
) -> Result<BatchReport, MazeError> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(config.runs.max(1));
    tracing::info!(
        "[eval] running {} sessions of {}x{} across {} workers",
        config.runs,
        config.width,
        config.height,
        workers
    );

    let (stats_tx, stats_rx) = mpsc::channel::<Result<SessionStats, MazeError>>();

    let collected = thread::scope(|scope| {
        for worker in 0..workers {
            let stats_tx = stats_tx.clone();
            let make_policy = &make_policy;
            scope.spawn(move || {
                for index in (worker..config.runs).step_by(workers) {
                    let outcome = run_one(config, make_policy, index);
                    if stats_tx.send(outcome).is_err() {
                        // Receiver gone: the batch was abandoned
                        break;
                    }
                }
            });
        }
        drop(stats_tx);

        let mut stats = Vec::with_capacity(config.runs);
        for outcome in stats_rx {
            stats.push(outcome?);
            if stats.len() % 1000 == 0 {
                tracing::info!("[eval] {}/{} sessions finished", stats.len(), config.runs);
            }
        }
        Ok::<_, MazeError>(stats)
    })?;

    Ok(average(&collected))
}

fn run_one(
    config: &BatchConfig,
    make_policy: &(impl Fn(Option<u64>) -> Box<dyn Policy> + Sync),
    index: usize,
) -> Result<SessionStats, MazeError> {
    let run_seed = config.seed.wrapping_add(index as u64);
    let maze = Maze::generate(config.width, config.height, Some(run_seed))?;
    let mut session = Session::new(maze, config.preset, Some(run_seed ^ CHERRY_SALT))?;
    let mut policy = make_policy(Some(run_seed ^ POLICY_SALT));
    run_policy(&mut session, policy.as_mut(), config.max_moves, |_| {});
    Ok(session.stats())
}

fn average(stats: &[SessionStats]) -> BatchReport {
    let n = stats.len().max(1) as f64;
    let sum = |f: fn(&SessionStats) -> f64| stats.iter().map(f).sum::<f64>();
    BatchReport {
        runs: stats.len(),
        avg_score: sum(|s| s.score as f64) / n,
        avg_explorer_score: sum(|s| s.explorer_score as f64) / n,
        avg_moves: sum(|s| s.num_moves as f64) / n,
        avg_visited: sum(|s| s.visited_cells as f64) / n,
        completion_rate: sum(|s| s.goal_reached as u8 as f64) / n,
        capture_rate: sum(|s| s.cherry_captured as u8 as f64) / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Backtracker;

    fn backtrack_config(runs: usize) -> BatchConfig {
        BatchConfig {
            width: 6,
            height: 6,
            runs,
            preset: ScorePreset::ExplorationWithCollectible,
            max_moves: 200,
            seed: 40,
        }
    }

    #[test]
    fn test_batch_runs_all_sessions() {
        let report = run_batch(&backtrack_config(16), |_| Box::new(Backtracker::new())).unwrap();
        assert_eq!(report.runs, 16);
        // The backtracker always finishes a 6x6 maze within the budget
        assert_eq!(report.completion_rate, 1.0);
        assert!(report.avg_moves > 0.0);
    }

    #[test]
    fn test_batch_is_reproducible() {
        let first = run_batch(&backtrack_config(8), |_| Box::new(Backtracker::new())).unwrap();
        let second = run_batch(&backtrack_config(8), |_| Box::new(Backtracker::new())).unwrap();
        assert_eq!(first.avg_score, second.avg_score);
        assert_eq!(first.avg_moves, second.avg_moves);
        assert_eq!(first.avg_visited, second.avg_visited);
    }
}
