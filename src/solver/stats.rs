use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Counters accumulated over one solve run.
///
/// A hybrid run accumulates into a single set of counters across both
/// phases: the propagation fields describe its first phase, the search
/// fields the fallback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolveStats {
    /// Propagation passes executed, whether or not they changed anything.
    pub passes: u32,
    /// Cells assigned by naked-single collapse.
    pub cells_collapsed: u32,
    /// Search nodes visited, one per recursive call.
    pub nodes_visited: u64,
    /// Trial assignments undone.
    pub backtracks: u64,
}

/// Renders the counters as a bordered table for terminal display.
pub fn render_stats_table(stats: &SolveStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));
    table.add_row(Row::new(vec![
        Cell::new("Propagation passes"),
        Cell::new(&stats.passes.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Cells collapsed"),
        Cell::new(&stats.cells_collapsed.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Search nodes visited"),
        Cell::new(&stats.nodes_visited.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Backtracks"),
        Cell::new(&stats.backtracks.to_string()),
    ]));
    table.to_string()
}
