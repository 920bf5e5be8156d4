//! Progress reporting from the engines.

use serde::Serialize;

use crate::board::Coord;

/// The engine a solve request is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Propagation,
    Search,
}

/// A defined yield point inside the engines.
///
/// The engines own no timing or rendering: they emit an event wherever an
/// interactive driver would want to redraw intermediate state, and leave
/// pacing entirely to the observer. An observer that returns promptly keeps
/// the run at full speed; one that sleeps throttles it for progressive
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveEvent {
    /// The run entered the named engine.
    PhaseStarted { phase: Phase },
    /// Propagation assigned the lone candidate of a cell.
    CellCollapsed { at: Coord, digit: u8 },
    /// A propagation pass finished after changing the grid. Emitted only for
    /// passes with at least one collapse.
    PassCompleted { cycle: u32, collapsed: u32 },
    /// Search wrote a trial digit into a cell.
    TrialAssigned { at: Coord, digit: u8 },
    /// Search removed a failed trial digit.
    TrialUndone { at: Coord, digit: u8 },
}

/// Receives [`SolveEvent`]s as an engine runs.
pub trait SolveObserver {
    fn on_event(&mut self, event: SolveEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SolveObserver for NullObserver {
    fn on_event(&mut self, _event: SolveEvent) {}
}

/// Buffers every event, for tests and for drivers that replay progress at
/// their own pace.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<SolveEvent>,
}

impl SolveObserver for RecordingObserver {
    fn on_event(&mut self, event: SolveEvent) {
        self.events.push(event);
    }
}
