use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    bet::BetLimits,
    error::{Result, SlotError},
    symbols::SymbolTable,
};

/// Machine shape, bet limits and symbol table. Every field has a default, so a
/// config file only needs the knobs it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default)]
    pub limits: BetLimits,
    #[serde(default)]
    pub symbols: SymbolTable,
    /// Winnings of at least this many times the per-line bet count as a jackpot.
    #[serde(default = "default_jackpot_multiplier")]
    pub jackpot_multiplier: u64,
}

fn default_rows() -> usize {
    3
}

fn default_cols() -> usize {
    3
}

fn default_jackpot_multiplier() -> u64 {
    10
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            limits: BetLimits::default(),
            symbols: SymbolTable::default(),
            jackpot_multiplier: default_jackpot_multiplier(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SlotError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Startup checks. A machine that cannot produce a valid grid is rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SlotError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.cols
            )));
        }
        if self.limits.max_lines == 0 || self.limits.max_lines > self.rows {
            return Err(SlotError::InvalidConfig(format!(
                "max_lines must be between 1 and rows ({}), got {}",
                self.rows, self.limits.max_lines
            )));
        }
        if self.limits.min_bet == 0 || self.limits.min_bet > self.limits.max_bet {
            return Err(SlotError::InvalidConfig(format!(
                "bet range ${}..=${} is empty or starts at zero",
                self.limits.min_bet, self.limits.max_bet
            )));
        }
        // the best possible round must still fit a signed net gain
        let max_stake = u128::from(self.limits.max_bet) * self.limits.max_lines as u128;
        for entry in self.symbols.entries() {
            let best = u128::from(entry.value).checked_mul(max_stake);
            if best.map_or(true, |w| w > i64::MAX as u128) {
                return Err(SlotError::InvalidConfig(format!(
                    "symbol {} value {} overflows winnings at the maximum bet",
                    entry.symbol, entry.value
                )));
            }
        }
        let pool_size = self.symbols.pool_size();
        if pool_size < self.rows {
            return Err(SlotError::InsufficientPool {
                rows: self.rows,
                pool_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Symbol, SymbolSpec};

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.rows, 3);
        assert_eq!(config.limits.max_bet, 100);
        assert_eq!(config.symbols.weight(Symbol::D), Some(8));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"cols": 5, "limits": {"max_bet": 20}}"#).unwrap();
        assert_eq!(config.cols, 5);
        assert_eq!(config.rows, 3);
        assert_eq!(config.limits.max_bet, 20);
        assert_eq!(config.limits.min_bet, 1);
        assert_eq!(config.symbols, SymbolTable::classic());
    }

    #[test]
    fn symbols_from_json() {
        let config = GameConfig::from_json(
            r#"{"symbols": [
                {"symbol": "A", "weight": 4, "value": 7},
                {"symbol": "B", "weight": 4, "value": 1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.symbols.get(Symbol::A), Some(&SymbolSpec::new(Symbol::A, 4, 7)));
        assert_eq!(config.symbols.pool_size(), 8);
    }

    #[test]
    fn duplicate_symbols_in_json_rejected() {
        let err = GameConfig::from_json(
            r#"{"symbols": [
                {"symbol": "A", "weight": 4, "value": 7},
                {"symbol": "A", "weight": 4, "value": 1}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SlotError::ConfigParse(_)));
    }

    #[test]
    fn small_pool_is_fatal() {
        let config = GameConfig {
            rows: 3,
            limits: BetLimits {
                max_lines: 3,
                ..BetLimits::default()
            },
            symbols: SymbolTable::new(vec![SymbolSpec::new(Symbol::A, 2, 5)]).unwrap(),
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, SlotError::InsufficientPool { rows: 3, pool_size: 2 }));
    }

    #[test]
    fn oversized_symbol_value_rejected() {
        let config = GameConfig {
            symbols: SymbolTable::new(vec![SymbolSpec::new(Symbol::A, 19, u64::MAX)]).unwrap(),
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, SlotError::InvalidConfig(_)));
    }

    #[test]
    fn too_many_lines_rejected() {
        let config = GameConfig {
            rows: 2,
            ..GameConfig::default()
        };
        assert!(matches!(config.validate(), Err(SlotError::InvalidConfig(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/slotline.json").unwrap_err();
        assert!(matches!(err, SlotError::Io { .. }));
    }
}
