use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Pool weight and payout multiplier of one symbol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolSpec {
    pub symbol: Symbol,
    /// Copies of the symbol placed in each column's pool.
    pub weight: u32,
    /// Payout multiplier applied to the per-line bet.
    pub value: u64,
}

impl SymbolSpec {
    pub fn new(symbol: Symbol, weight: u32, value: u64) -> Self {
        Self {
            symbol,
            weight,
            value,
        }
    }
}

/// Symbol weights and values. Each symbol appears at most once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<SymbolSpec>", into = "Vec<SymbolSpec>")]
pub struct SymbolTable(Vec<SymbolSpec>);

impl SymbolTable {
    pub fn new(entries: Vec<SymbolSpec>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SlotError::InvalidConfig("symbol table is empty".into()));
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.symbol == entry.symbol) {
                return Err(SlotError::InvalidConfig(format!(
                    "symbol {} listed more than once",
                    entry.symbol
                )));
            }
        }
        Ok(Self(entries))
    }

    /// The classic four-symbol machine: rare symbols pay more.
    pub fn classic() -> Self {
        Self(vec![
            SymbolSpec::new(Symbol::A, 2, 5),
            SymbolSpec::new(Symbol::B, 3, 4),
            SymbolSpec::new(Symbol::C, 6, 3),
            SymbolSpec::new(Symbol::D, 8, 2),
        ])
    }

    pub fn entries(&self) -> &[SymbolSpec] {
        &self.0
    }

    pub fn get(&self, symbol: Symbol) -> Option<&SymbolSpec> {
        self.0.iter().find(|e| e.symbol == symbol)
    }

    pub fn weight(&self, symbol: Symbol) -> Option<u32> {
        self.get(symbol).map(|e| e.weight)
    }

    pub fn value(&self, symbol: Symbol) -> Option<u64> {
        self.get(symbol).map(|e| e.value)
    }

    pub fn pool_size(&self) -> usize {
        self.0.iter().map(|e| e.weight as usize).sum()
    }

    /// Every symbol repeated `weight` times, in table order.
    pub fn pool(&self) -> Vec<Symbol> {
        let mut pool = Vec::with_capacity(self.pool_size());
        for entry in &self.0 {
            pool.extend(std::iter::repeat(entry.symbol).take(entry.weight as usize));
        }
        pool
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<SymbolSpec>> for SymbolTable {
    type Error = SlotError;

    fn try_from(entries: Vec<SymbolSpec>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<SymbolTable> for Vec<SymbolSpec> {
    fn from(table: SymbolTable) -> Self {
        table.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_pool_matches_weights() {
        let table = SymbolTable::classic();
        let pool = table.pool();
        assert_eq!(pool.len(), 19);
        assert_eq!(table.pool_size(), 19);
        for entry in table.entries() {
            let n = pool.iter().filter(|s| **s == entry.symbol).count();
            assert_eq!(n, entry.weight as usize);
        }
    }

    #[test]
    fn duplicate_symbol_rejected() {
        let err = SymbolTable::new(vec![
            SymbolSpec::new(Symbol::A, 1, 1),
            SymbolSpec::new(Symbol::A, 2, 2),
        ])
        .unwrap_err();
        assert!(matches!(err, SlotError::InvalidConfig(_)));
    }

    #[test]
    fn empty_table_rejected() {
        assert!(SymbolTable::new(Vec::new()).is_err());
    }
}
