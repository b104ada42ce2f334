use std::path::PathBuf;
use std::time::Duration;

use mazerun::eval::{BatchConfig, run_batch};
use mazerun::policy::{self, DEFAULT_MAX_MOVES, run_policy};
use mazerun::render::Renderer;
use mazerun::session::{ScorePreset, Session};
use mazerun::Maze;
use mazerun::store;

/// Everything the three subcommands need, filled from the command line.
struct Options {
    width: u16,
    height: u16,
    policy: String,
    preset: ScorePreset,
    seed: Option<u64>,
    runs: usize,
    count: usize,
    fast: bool,
    maze_file: Option<PathBuf>,
    out_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            width: 20,
            height: 20,
            policy: "backtrack".to_string(),
            preset: ScorePreset::ExplorationWithCollectible,
            seed: None,
            runs: 10_000,
            count: 3,
            fast: false,
            maze_file: None,
            out_dir: PathBuf::from("mazes"),
        }
    }
}

fn usage() {
    eprintln!("Usage: mazerun <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  play    Animate one policy run in the terminal");
    eprintln!("  eval    Average a policy's stats over many mazes");
    eprintln!("  gen     Export freshly generated mazes as JSON files");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --width N      Maze width in cells (default 20)");
    eprintln!("  --height N     Maze height in cells (default 20)");
    eprintln!("  --policy NAME  random | wall-follower | backtrack (default backtrack)");
    eprintln!("  --preset NAME  basic | exploration-with-collectible (default)");
    eprintln!("  --seed N       Seed for reproducible mazes and policies");
    eprintln!("  --runs N       eval: number of sessions (default 10000)");
    eprintln!("  --count N      gen: number of mazes to export (default 3)");
    eprintln!("  --out DIR      gen: output directory (default mazes/)");
    eprintln!("  --maze FILE    play: load a maze file instead of generating");
    eprintln!("  --fast         play: speed up the animation");
}

fn parse_options(args: &[String]) -> Option<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--width" => options.width = iter.next()?.parse().ok()?,
            "--height" => options.height = iter.next()?.parse().ok()?,
            "--policy" => options.policy = iter.next()?.clone(),
            "--preset" => {
                options.preset = match iter.next()?.as_str() {
                    "basic" => ScorePreset::Basic,
                    "exploration-with-collectible" => ScorePreset::ExplorationWithCollectible,
                    _ => return None,
                }
            }
            "--seed" => options.seed = Some(iter.next()?.parse().ok()?),
            "--runs" => options.runs = iter.next()?.parse().ok()?,
            "--count" => options.count = iter.next()?.parse().ok()?,
            "--out" => options.out_dir = PathBuf::from(iter.next()?),
            "--maze" => options.maze_file = Some(PathBuf::from(iter.next()?)),
            "--fast" => options.fast = true,
            _ => return None,
        }
    }
    Some(options)
}

/// Route tracing to a log file; the terminal belongs to the renderer.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "mazerun.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    guard
}

fn play(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    // A loaded file dictates its own collectible (or the lack of one);
    // generated mazes get theirs placed at random
    let mut session = match &options.maze_file {
        Some(path) => {
            let (maze, cherry) = store::load(path)?;
            Session::with_collectible(maze, options.preset, cherry)?
        }
        None => {
            let maze = Maze::generate(options.width, options.height, options.seed)?;
            Session::new(maze, options.preset, options.seed)?
        }
    };

    let Some(mut policy) = policy::by_name(&options.policy, options.seed) else {
        eprintln!("Unknown policy: {}", options.policy);
        return Ok(());
    };

    let refresh = if options.fast {
        Duration::from_millis(5)
    } else {
        Duration::from_millis(200)
    };
    let mut renderer = Renderer::new(refresh);
    renderer.draw(&session).ok();

    tracing::info!(
        "[play] running policy {} on a {}x{} maze",
        policy.name(),
        session.maze().width(),
        session.maze().height()
    );
    let outcome = run_policy(&mut session, policy.as_mut(), DEFAULT_MAX_MOVES, |state| {
        renderer.draw(state).ok();
    });
    tracing::info!("[play] run finished: {:?}", outcome);

    renderer.finish(&session)?;
    Ok(())
}

fn eval(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    if policy::by_name(&options.policy, None).is_none() {
        eprintln!("Unknown policy: {}", options.policy);
        return Ok(());
    }
    let config = BatchConfig {
        width: options.width,
        height: options.height,
        runs: options.runs,
        preset: options.preset,
        max_moves: DEFAULT_MAX_MOVES,
        seed: options.seed.unwrap_or(0),
    };
    let policy_name = options.policy.clone();
    let report = run_batch(&config, |seed| {
        // Validated above; every worker constructs its own instance
        policy::by_name(&policy_name, seed).expect("policy name was validated")
    })?;

    println!("Average stats over {} runs", report.runs);
    println!("-----------------------------");
    println!("Score:            {:.2}", report.avg_score);
    println!("Explorer score:   {:.2}", report.avg_explorer_score);
    println!("Moves:            {:.2}", report.avg_moves);
    println!("Visited cells:    {:.2}", report.avg_visited);
    println!("Completion rate:  {:.2}%", report.completion_rate * 100.0);
    println!("Capture rate:     {:.2}%", report.capture_rate * 100.0);
    Ok(())
}

fn generate_mazes(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    for index in 0..options.count {
        let seed = options.seed.map(|s| s.wrapping_add(index as u64));
        let maze = Maze::generate(options.width, options.height, seed)?;
        // A session's only job here is placing the collectible
        let session = Session::new(maze, options.preset, seed)?;
        let path = options.out_dir.join(format!("maze_{}.json", index + 1));
        store::export(session.maze(), session.collectible_position(), &path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        usage();
        return Ok(());
    };
    let Some(options) = parse_options(rest) else {
        usage();
        return Ok(());
    };

    match command.as_str() {
        "play" => play(&options),
        "eval" => eval(&options),
        "gen" => generate_mazes(&options),
        _ => {
            usage();
            Ok(())
        }
    }
}
