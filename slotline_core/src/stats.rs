use std::fmt;

use serde::Serialize;

/// Per-process counters. Reset on every start, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    games_played: u64,
    total_won: u64,
    total_lost: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finished round. A break-even round counts as a win of zero.
    pub fn record(&mut self, net_gain: i64) {
        self.games_played += 1;
        if net_gain >= 0 {
            self.total_won = self.total_won.saturating_add(net_gain.unsigned_abs());
        } else {
            self.total_lost = self.total_lost.saturating_add(net_gain.unsigned_abs());
        }
    }

    pub fn games_played(&self) -> u64 {
        self.games_played
    }

    pub fn total_won(&self) -> u64 {
        self.total_won
    }

    pub fn total_lost(&self) -> u64 {
        self.total_lost
    }
}

impl fmt::Display for SessionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Games played: {}", self.games_played)?;
        writeln!(f, "Total won: ${}", self.total_won)?;
        write!(f, "Total lost: ${}", self.total_lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_wins_and_losses() {
        let mut stats = SessionStats::new();
        stats.record(3);
        stats.record(-5);
        stats.record(0);
        stats.record(-1);
        assert_eq!(stats.games_played(), 4);
        assert_eq!(stats.total_won(), 3);
        assert_eq!(stats.total_lost(), 6);
        assert_eq!(
            stats.to_string(),
            "Games played: 4\nTotal won: $3\nTotal lost: $6"
        );
    }
}
