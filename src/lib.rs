//! Nonet is a Sudoku session engine: a 9×9 grid with locked givens,
//! candidate-domain bookkeeping, manual editing with advisory conflict
//! reporting, and a trio of solver engines.
//!
//! # Core concepts
//!
//! - A [`Session`](session::Session) owns one puzzle in progress: the grid,
//!   the derived candidate domains, and the lock mask protecting the
//!   original givens. Independent puzzles live in independent sessions.
//! - A [`Domain`](board::Domain) is the set of digits still open for a cell
//!   given its row, column, and box peers. Domains are derived state,
//!   recomputed wholesale after every mutation rather than maintained
//!   incrementally.
//! - A [`SolveMode`](solver::SolveMode) picks an engine: `propagation`
//!   (naked-single elimination to fixpoint, may stall), `search` (exhaustive
//!   backtracking), or `hybrid` (propagation first, search over the rest).
//! - A [`SolveObserver`](solver::observer::SolveObserver) receives the
//!   engines' intermediate events for progressive display; the engines
//!   themselves own no timing.
//!
//! Stalled propagation, exhausted search, rejected edits of locked cells,
//! and conflicting manual values are all ordinary return values. Nothing in
//! the solving path returns an error or panics.
//!
//! # Example
//!
//! ```
//! use nonet::board::Coord;
//! use nonet::levels::Level;
//! use nonet::session::{EditOutcome, Session};
//! use nonet::solver::SolveMode;
//!
//! let mut session = Session::new();
//! session.load(Level::Starter.grid());
//!
//! // Givens are locked against edits; open cells report their candidates.
//! assert_eq!(session.edit(Coord::new(0, 3), 9), EditOutcome::Locked);
//! let open = session.grid().first_empty().unwrap();
//! assert!(!session.domain(open).is_empty());
//!
//! let report = session.solve(SolveMode::Hybrid);
//! assert!(report.solved);
//! assert!(session.is_complete());
//! ```

pub mod board;
pub mod error;
pub mod levels;
pub mod session;
pub mod solver;

#[cfg(test)]
pub(crate) mod testutil;
