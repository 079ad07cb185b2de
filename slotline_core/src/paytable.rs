use serde::Serialize;

use crate::{grid::Grid, symbols::SymbolTable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub winnings: u64,
    /// 1-based line numbers that paid, ascending.
    pub winning_lines: Vec<usize>,
}

/// Pay every active line whose row shows the same symbol in all columns.
///
/// Only rows `0..active_lines` are inspected; a matching row outside the
/// selection pays nothing. `active_lines` beyond the grid height is clamped.
pub fn evaluate(grid: &Grid, active_lines: usize, bet_per_line: u64, table: &SymbolTable) -> Payout {
    let mut payout = Payout::default();
    for row in 0..active_lines.min(grid.rows()) {
        let mut symbols = grid.row(row);
        let Some(first) = symbols.next() else {
            continue;
        };
        if symbols.all(|s| s == first) {
            // symbols outside the table only appear in hand-built grids
            let value = table.value(first).unwrap_or(0);
            payout.winnings = payout
                .winnings
                .saturating_add(value.saturating_mul(bet_per_line));
            payout.winning_lines.push(row + 1);
        }
    }
    payout
}
