//! The arc-consistency engine: naked-single elimination repeated to fixpoint.

use tracing::debug;

use crate::board::{Coord, Domain, Grid};
use crate::solver::observer::{SolveEvent, SolveObserver};
use crate::solver::stats::SolveStats;

/// Upper bound on propagation passes. Any chain of naked-single deductions
/// on a 9×9 grid settles well inside this; a puzzle needing more than
/// single-candidate reasoning stalls long before the cap and simply reports
/// "not solved".
pub const CYCLE_CAP: u32 = 50;

/// Repeats naked-single elimination until a full pass changes nothing or
/// [`CYCLE_CAP`] is reached, then reports whether the grid ended fully
/// filled.
///
/// Each pass scans cells in row-major order and recomputes the domain of
/// every empty cell *live*, so a collapse early in a pass feeds the
/// deductions later in the same pass. The scan order therefore fixes the
/// cascade order within a pass, though not the final fixpoint.
///
/// Cells are only ever assigned, never cleared: a stalled run leaves every
/// deduction it made in place. Stalling is an expected outcome, not an
/// error.
pub fn propagate(
    grid: &mut Grid,
    observer: &mut dyn SolveObserver,
    stats: &mut SolveStats,
) -> bool {
    let mut unstable = true;
    let mut cycle = 0;

    while unstable && cycle < CYCLE_CAP {
        unstable = false;
        let mut collapsed = 0;

        for at in Coord::all() {
            if !grid.is_empty_at(at) {
                continue;
            }
            if let Some(digit) = Domain::for_cell(grid, at).singleton_value() {
                grid.set(at, digit);
                observer.on_event(SolveEvent::CellCollapsed { at, digit });
                unstable = true;
                collapsed += 1;
            }
        }

        cycle += 1;
        stats.passes += 1;
        stats.cells_collapsed += collapsed;

        if collapsed > 0 {
            debug!(cycle, collapsed, "propagation pass collapsed cells");
            observer.on_event(SolveEvent::PassCompleted { cycle, collapsed });
        }
    }

    grid.is_filled()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::board::CellMatrix;
    use crate::solver::observer::{NullObserver, RecordingObserver};

    fn propagate_with_stats(grid: &mut Grid) -> (bool, SolveStats) {
        let mut stats = SolveStats::default();
        let solved = propagate(grid, &mut NullObserver, &mut stats);
        (solved, stats)
    }

    #[test]
    fn assigns_the_lone_candidate_of_a_nearly_full_row() {
        let mut rows: CellMatrix = [[0; 9]; 9];
        rows[0] = [1, 2, 3, 4, 5, 6, 7, 8, 0];
        let mut grid = Grid::from_rows(rows).unwrap();

        let mut stats = SolveStats::default();
        let mut observer = RecordingObserver::default();
        propagate(&mut grid, &mut observer, &mut stats);

        assert_eq!(grid.value(Coord::new(0, 8)), Some(9));
        assert!(observer.events.contains(&SolveEvent::CellCollapsed {
            at: Coord::new(0, 8),
            digit: 9,
        }));
    }

    #[test]
    fn cascades_within_a_single_pass() {
        // (0, 7) collapses to 8 first; that collapse is what makes (0, 8) a
        // naked single later in the same row-major pass.
        let mut rows: CellMatrix = [[0; 9]; 9];
        rows[0] = [1, 2, 3, 4, 5, 6, 7, 0, 0];
        rows[4][7] = 9;
        let mut grid = Grid::from_rows(rows).unwrap();

        let mut stats = SolveStats::default();
        let mut observer = RecordingObserver::default();
        propagate(&mut grid, &mut observer, &mut stats);

        assert_eq!(grid.value(Coord::new(0, 7)), Some(8));
        assert_eq!(grid.value(Coord::new(0, 8)), Some(9));
        let first_pass = observer
            .events
            .iter()
            .find_map(|event| match event {
                SolveEvent::PassCompleted { cycle: 1, collapsed } => Some(*collapsed),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_pass, 2);
    }

    #[test]
    fn stalls_without_error_on_a_puzzle_needing_search() {
        let mut grid = crate::levels::Level::Nightmare.grid();
        let before = grid.empty_count();
        let (solved, stats) = propagate_with_stats(&mut grid);

        assert!(!solved);
        assert!(stats.passes <= CYCLE_CAP);
        assert!(grid.empty_count() <= before);
    }

    #[test]
    fn never_unassigns_and_halts_within_the_cap() {
        for level in crate::levels::Level::ALL {
            let original = level.grid();
            let mut grid = original.clone();
            let (_, stats) = propagate_with_stats(&mut grid);

            assert!(stats.passes <= CYCLE_CAP, "{} exceeded the cap", level);
            assert!(grid.empty_count() <= original.empty_count());
            for at in Coord::all() {
                if let Some(given) = original.value(at) {
                    assert_eq!(grid.value(at), Some(given), "{} changed {}", level, at);
                }
            }
        }
    }

    #[test]
    fn fixpoint_pass_emits_no_event() {
        // A grid propagation cannot advance: the trailing no-change pass
        // terminates the loop without a PassCompleted event.
        let mut grid = Grid::empty();
        let mut stats = SolveStats::default();
        let mut observer = RecordingObserver::default();
        let solved = propagate(&mut grid, &mut observer, &mut stats);

        assert!(!solved);
        assert_eq!(stats.passes, 1);
        assert!(observer.events.is_empty());
        assert_eq!(grid, Grid::empty());
    }
}
