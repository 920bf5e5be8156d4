//! Solve a built-in level or a JSON puzzle file from the command line.
//!
//! ```text
//! cargo run --example solve -- --level nightmare --mode hybrid --stats
//! cargo run --example solve -- --file puzzle.json --mode search --watch
//! ```
//!
//! Puzzle files hold a 9×9 matrix of digits, `0` meaning empty, e.g.
//! `[[5,3,0,...],...]`.

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nonet::levels::Level;
use nonet::session::Session;
use nonet::solver::observer::{SolveEvent, SolveObserver};
use nonet::solver::stats::render_stats_table;
use nonet::solver::SolveMode;

#[derive(Parser)]
#[command(about = "Solve a Sudoku puzzle with a chosen engine")]
struct Args {
    /// Built-in level to load: starter, moderate, complex, or nightmare.
    #[arg(long, default_value = "starter", conflicts_with = "file")]
    level: Level,

    /// JSON file holding a 9×9 digit matrix, 0 meaning empty.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Engine to run: propagation, search, or hybrid.
    #[arg(long, default_value = "hybrid")]
    mode: SolveMode,

    /// Print every intermediate event as the engines emit it.
    #[arg(long)]
    watch: bool,

    /// Print the statistics table after solving.
    #[arg(long)]
    stats: bool,
}

/// Prints each event the way the engines emit them, unpaced.
struct ConsoleObserver;

impl SolveObserver for ConsoleObserver {
    fn on_event(&mut self, event: SolveEvent) {
        match event {
            SolveEvent::PhaseStarted { phase } => println!("> entering {:?} phase", phase),
            SolveEvent::PassCompleted { cycle, collapsed } => {
                println!("> cycle {}: collapsed {} cells", cycle, collapsed)
            }
            SolveEvent::CellCollapsed { at, digit } => {
                println!("> {} collapsed to {}", at, digit)
            }
            SolveEvent::TrialAssigned { at, digit } => println!("> trying {} at {}", digit, at),
            SolveEvent::TrialUndone { at, .. } => println!("> undoing {}", at),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let puzzle = match &args.file {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => args.level.grid(),
    };

    let mut session = Session::new();
    session.load(puzzle);
    println!("{}", session.grid());

    let report = if args.watch {
        session.solve_with(args.mode, &mut ConsoleObserver)
    } else {
        session.solve(args.mode)
    };

    println!("{}", session.grid());
    println!(
        "{} ({} mode)",
        if report.solved { "solved" } else { "not solved" },
        args.mode
    );

    if args.stats {
        println!("{}", render_stats_table(&report.stats));
    }

    Ok(())
}
