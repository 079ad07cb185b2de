use std::fmt;

use serde::Serialize;

use crate::{
    error::{Result, SlotError},
    rng::SpinRng,
    symbols::{Symbol, SymbolTable},
};

/// Spin result stored column-major: `columns[col][row]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    columns: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Build a grid from explicit columns. Columns must be non-empty and of equal height.
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> Result<Self> {
        let rows = columns.first().map(Vec::len).unwrap_or(0);
        if rows == 0 {
            return Err(SlotError::InvalidConfig("grid has no rows or columns".into()));
        }
        if let Some(bad) = columns.iter().position(|c| c.len() != rows) {
            return Err(SlotError::InvalidConfig(format!(
                "column {} has {} rows, expected {}",
                bad,
                columns[bad].len(),
                rows
            )));
        }
        Ok(Self { columns })
    }

    pub fn rows(&self) -> usize {
        self.columns[0].len()
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.columns
    }

    /// Symbols of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().map(move |c| c[row])
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            let cells: Vec<String> = self.row(row).map(|s| s.to_string()).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}

/// Draw a `rows` x `cols` grid. Every column samples without replacement
/// from its own fresh copy of the weighted pool.
pub fn generate(rows: usize, cols: usize, table: &SymbolTable, rng: &mut SpinRng) -> Result<Grid> {
    if rows == 0 || cols == 0 {
        return Err(SlotError::InvalidConfig(format!(
            "grid must be at least 1x1, got {rows}x{cols}"
        )));
    }
    let pool = table.pool();
    if pool.len() < rows {
        return Err(SlotError::InsufficientPool {
            rows,
            pool_size: pool.len(),
        });
    }

    let mut columns = Vec::with_capacity(cols);
    for _ in 0..cols {
        let mut remaining = pool.clone();
        let mut column = Vec::with_capacity(rows);
        for _ in 0..rows {
            let idx = rng.pick_index(remaining.len());
            column.push(remaining.swap_remove(idx));
        }
        columns.push(column);
    }
    Ok(Grid { columns })
}
