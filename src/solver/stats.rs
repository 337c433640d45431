use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Counters describing a single solve invocation.
///
/// Reset at the start of every search and monotonically increasing while
/// one runs. Purely diagnostic: an external supervisor can poll the visit
/// counter to decide whether to abandon a long-running search, but none of
/// the counters affect the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Search-tree nodes entered: one for the root invocation plus one per
    /// accepted assignment extension.
    pub visits: u64,
    /// Calls to `revise` across all propagation runs.
    pub revise_calls: u64,
    /// Values pruned from domains by propagation.
    pub prunings: u64,
}

impl SearchStats {
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Renders the counters as a bordered table for diagnostic output.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Count")]));
    table.add_row(Row::new(vec![
        Cell::new("Search visits"),
        Cell::new(&stats.visits.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Revise calls"),
        Cell::new(&stats.revise_calls.to_string()),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Prunings"),
        Cell::new(&stats.prunings.to_string()),
    ]));
    table.to_string()
}
