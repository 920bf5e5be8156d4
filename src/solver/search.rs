//! The backtracking engine: exhaustive depth-first search with undo.

use tracing::trace;

use crate::board::{Domain, Grid};
use crate::solver::observer::{SolveEvent, SolveObserver};
use crate::solver::stats::SolveStats;

/// Searches for any completion of `grid`, depth-first.
///
/// Branches on the first empty cell in row-major order and tries its live
/// candidates in ascending order, so the result is deterministic: of several
/// possible completions, the one reached first under that ordering is the
/// one left in the grid. No variable- or value-ordering heuristic is
/// applied, so engineered pathological grids can take exponential time.
///
/// On success the solution stays in the grid. On failure every trial
/// assignment has been undone and the grid is byte-for-byte its pre-call
/// state. Failure is an expected outcome, not an error.
///
/// Recursion depth is bounded by the number of empty cells (at most 81).
pub fn search(grid: &mut Grid, observer: &mut dyn SolveObserver, stats: &mut SolveStats) -> bool {
    stats.nodes_visited += 1;

    let Some(at) = grid.first_empty() else {
        return true;
    };

    let candidates = Domain::for_cell(grid, at);
    for digit in candidates.iter() {
        grid.set(at, digit);
        trace!(row = at.row, col = at.col, digit, "trial assignment");
        observer.on_event(SolveEvent::TrialAssigned { at, digit });

        if search(grid, observer, stats) {
            return true;
        }

        grid.clear_cell(at);
        stats.backtracks += 1;
        observer.on_event(SolveEvent::TrialUndone { at, digit });
    }

    false
}
