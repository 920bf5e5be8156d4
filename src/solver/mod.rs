//! The solver engines and the orchestration shared between them.
//!
//! Two complementary engines operate on a [`Grid`] in place:
//!
//! - [`propagation`] collapses naked singles to a fixpoint: cheap, but it
//!   stalls on puzzles needing more than single-candidate reasoning;
//! - [`search`] is exhaustive backtracking: complete, but worst-case
//!   exponential.
//!
//! [`SolveMode::Hybrid`] sequences them: propagation first shrinks the
//! search tree, then search handles whatever remains.

pub mod observer;
pub mod propagation;
pub mod search;
pub mod stats;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Grid;
use crate::error::Error;
use crate::solver::observer::{Phase, SolveEvent, SolveObserver};
use crate::solver::stats::SolveStats;

/// Selects which engine a solve request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveMode {
    /// Constraint propagation only. Stalls without error on puzzles that
    /// need guessing.
    Propagation,
    /// Exhaustive backtracking only.
    Search,
    /// Propagation to fixpoint, then backtracking over the residual grid.
    Hybrid,
}

impl SolveMode {
    pub const ALL: [SolveMode; 3] = [SolveMode::Propagation, SolveMode::Search, SolveMode::Hybrid];

    pub fn name(self) -> &'static str {
        match self {
            SolveMode::Propagation => "propagation",
            SolveMode::Search => "search",
            SolveMode::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for SolveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "propagation" => Ok(SolveMode::Propagation),
            "search" => Ok(SolveMode::Search),
            "hybrid" => Ok(SolveMode::Hybrid),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// The outcome of a solve run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolveReport {
    /// Whether the grid ended fully filled. `false` means a propagation
    /// stall or an exhausted search, both ordinary outcomes callers branch
    /// on, not errors.
    pub solved: bool,
    pub stats: SolveStats,
}

/// Runs the engine selected by `mode` against `grid`, reporting progress to
/// `observer`.
///
/// The grid is mutated in place. A failed search hands it back exactly as it
/// was; a stalled propagation run keeps every deduction it made.
pub fn run(mode: SolveMode, grid: &mut Grid, observer: &mut dyn SolveObserver) -> SolveReport {
    debug!(%mode, "solve requested");
    let mut stats = SolveStats::default();
    let solved = match mode {
        SolveMode::Propagation => run_propagation(grid, observer, &mut stats),
        SolveMode::Search => run_search(grid, observer, &mut stats),
        SolveMode::Hybrid => {
            if run_propagation(grid, observer, &mut stats) {
                true
            } else {
                debug!("propagation stalled, engaging search");
                run_search(grid, observer, &mut stats)
            }
        }
    };
    SolveReport { solved, stats }
}

fn run_propagation(
    grid: &mut Grid,
    observer: &mut dyn SolveObserver,
    stats: &mut SolveStats,
) -> bool {
    observer.on_event(SolveEvent::PhaseStarted {
        phase: Phase::Propagation,
    });
    propagation::propagate(grid, observer, stats)
}

fn run_search(grid: &mut Grid, observer: &mut dyn SolveObserver, stats: &mut SolveStats) -> bool {
    observer.on_event(SolveEvent::PhaseStarted {
        phase: Phase::Search,
    });
    search::search(grid, observer, stats)
}
