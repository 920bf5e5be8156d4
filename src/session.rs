//! The interactive solving context: one puzzle, its candidate domains, and
//! the lock mask protecting the original givens.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Coord, Domain, DomainMatrix, Grid, GRID_SIDE};
use crate::solver::observer::{NullObserver, SolveObserver};
use crate::solver::{self, SolveMode, SolveReport};

/// Cells pre-filled by a loaded puzzle, immutable to edits and engines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LockMask([[bool; GRID_SIDE]; GRID_SIDE]);

impl LockMask {
    fn is_locked(&self, at: Coord) -> bool {
        self.0[at.row][at.col]
    }

    fn lock(&mut self, at: Coord) {
        self.0[at.row][at.col] = true;
    }

    fn clear(&mut self) {
        self.0 = [[false; GRID_SIDE]; GRID_SIDE];
    }
}

/// The answer to a manual edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// The value was written. `conflict` is advisory: `true` means the digit
    /// was not in the cell's pre-assignment domain, but the write happened
    /// anyway.
    Applied { conflict: bool },
    /// The cell is a locked given; nothing changed.
    Locked,
    /// The digit is outside `1..=9`; nothing changed.
    OutOfRange,
}

/// The answer to a manual clear request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearOutcome {
    Cleared,
    /// The cell is a locked given; nothing changed.
    Locked,
}

/// One puzzle in progress.
///
/// A session owns the grid, the derived domain matrix, and the lock mask;
/// every engine and every manual operation works through it by exclusive
/// reference. Independent puzzles live in independent sessions; there is no
/// shared state between them.
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    domains: DomainMatrix,
    locks: LockMask,
}

impl Session {
    /// Creates a session holding an empty, fully unlocked grid.
    pub fn new() -> Self {
        let grid = Grid::empty();
        let domains = DomainMatrix::for_grid(&grid);
        Self {
            grid,
            domains,
            locks: LockMask::default(),
        }
    }

    /// Loads a starting position: the previous state is discarded, every
    /// nonzero cell of `puzzle` becomes a locked given, and domains are
    /// recomputed.
    ///
    /// The puzzle is accepted even if its givens already violate
    /// row/column/box constraints. Solving such a grid behaves however the
    /// algorithms behave; the advisory conflict flag on manual edits is the
    /// only consistency reporting.
    pub fn load(&mut self, puzzle: Grid) {
        self.locks.clear();
        let mut givens = 0;
        for at in Coord::all() {
            if !puzzle.is_empty_at(at) {
                self.locks.lock(at);
                givens += 1;
            }
        }
        self.grid = puzzle;
        self.domains.refresh(&self.grid);
        debug!(givens, "puzzle loaded");
    }

    /// Returns the session to the all-empty, all-unlocked state.
    pub fn reset(&mut self) {
        self.grid = Grid::empty();
        self.locks.clear();
        self.domains.refresh(&self.grid);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The stored domain of `at`, as of the last recomputation. Filled cells
    /// hold the empty domain by convention.
    pub fn domain(&self, at: Coord) -> &Domain {
        self.domains.domain(at)
    }

    pub fn is_locked(&self, at: Coord) -> bool {
        self.locks.is_locked(at)
    }

    /// Completion in the "no empty cells" sense only: a full grid with a
    /// duplicated digit still counts as complete.
    pub fn is_complete(&self) -> bool {
        self.grid.is_filled()
    }

    /// Writes `digit` into `at` directly, without running any engine.
    ///
    /// Locked cells reject the write and nothing changes. Otherwise the
    /// write always happens, even when it violates constraints, and the
    /// returned flag reports whether the digit was missing from the cell's
    /// live domain just before the assignment. Note that the pre-assignment
    /// domain of a *filled* cell excludes the cell's own value, so
    /// re-entering the digit a cell already holds reports a conflict.
    /// Domains are recomputed after the write.
    pub fn edit(&mut self, at: Coord, digit: u8) -> EditOutcome {
        if self.locks.is_locked(at) {
            debug!(%at, "edit rejected, cell is locked");
            return EditOutcome::Locked;
        }
        if !(1..=9).contains(&digit) {
            return EditOutcome::OutOfRange;
        }
        let conflict = !Domain::for_cell(&self.grid, at).contains(digit);
        self.grid.set(at, digit);
        self.domains.refresh(&self.grid);
        if conflict {
            debug!(%at, digit, "conflicting value accepted");
        }
        EditOutcome::Applied { conflict }
    }

    /// Empties `at` unless it is locked, then recomputes domains.
    pub fn clear(&mut self, at: Coord) -> ClearOutcome {
        if self.locks.is_locked(at) {
            debug!(%at, "clear rejected, cell is locked");
            return ClearOutcome::Locked;
        }
        self.grid.clear_cell(at);
        self.domains.refresh(&self.grid);
        ClearOutcome::Cleared
    }

    /// Runs the engine selected by `mode`, mutating the grid in place, and
    /// refreshes the domain matrix afterwards.
    pub fn solve(&mut self, mode: SolveMode) -> SolveReport {
        self.solve_with(mode, &mut NullObserver)
    }

    /// Like [`Session::solve`], streaming progress events to `observer`.
    pub fn solve_with(
        &mut self,
        mode: SolveMode,
        observer: &mut dyn SolveObserver,
    ) -> SolveReport {
        let report = solver::run(mode, &mut self.grid, observer);
        self.domains.refresh(&self.grid);
        report
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
