use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BetLimits {
    pub min_bet: u64,
    pub max_bet: u64,
    pub max_lines: usize,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: 100,
            max_lines: 3,
        }
    }
}

impl BetLimits {
    pub fn check_lines(&self, lines: usize) -> Result<()> {
        if lines == 0 || lines > self.max_lines {
            return Err(SlotError::InvalidBet(format!(
                "line count must be between 1 and {}",
                self.max_lines
            )));
        }
        Ok(())
    }

    pub fn check_per_line(&self, per_line: u64) -> Result<()> {
        if per_line < self.min_bet || per_line > self.max_bet {
            return Err(SlotError::InvalidBet(format!(
                "bet must be between ${} and ${}",
                self.min_bet, self.max_bet
            )));
        }
        Ok(())
    }

    pub fn check(&self, bet: &Bet) -> Result<()> {
        self.check_lines(bet.lines)?;
        self.check_per_line(bet.per_line)
    }
}

/// Wager for one spin: `per_line` on each of the first `lines` rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    pub per_line: u64,
    pub lines: usize,
}

impl Bet {
    pub fn new(per_line: u64, lines: usize) -> Self {
        Self { per_line, lines }
    }

    pub fn total(&self) -> u64 {
        self.per_line.saturating_mul(self.lines as u64)
    }

    /// The whole balance may be staked.
    pub fn is_affordable(&self, balance: u64) -> bool {
        self.total() <= balance
    }

    pub fn ensure_affordable(&self, balance: u64) -> Result<()> {
        if !self.is_affordable(balance) {
            return Err(SlotError::InsufficientFunds {
                total_bet: self.total(),
                balance,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${} on {} line{}, total ${}",
            self.per_line,
            self.lines,
            if self.lines == 1 { "" } else { "s" },
            self.total()
        )
    }
}
