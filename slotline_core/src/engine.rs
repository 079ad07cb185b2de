use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    bet::Bet,
    config::GameConfig,
    error::{Result, SlotError},
    grid::{self, Grid},
    paytable::{self, Payout},
    rng::SpinRng,
    stats::SessionStats,
    store::BalanceStore,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub grid: Grid,
    pub bet: Bet,
    pub winnings: u64,
    pub winning_lines: Vec<usize>,
    pub net_gain: i64,
}

impl RoundOutcome {
    fn new(grid: Grid, bet: Bet, payout: Payout) -> Self {
        // i128 so neither side can wrap before the subtraction
        let net_gain = (i128::from(payout.winnings) - i128::from(bet.total()))
            .clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Self {
            grid,
            bet,
            winnings: payout.winnings,
            winning_lines: payout.winning_lines,
            net_gain,
        }
    }

    pub fn settle(&self, balance: u64) -> u64 {
        balance
            .saturating_sub(self.bet.total())
            .saturating_add(self.winnings)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    Completed,
    BelowMinimumBet,
    // covers the minimum but not the batch's fixed bet
    CannotCoverBet,
}

#[derive(Debug)]
pub struct RoundReport<'a> {
    pub round: u32,
    pub rounds: u32,
    pub outcome: &'a RoundOutcome,
    pub balance: u64,
    pub persist_error: Option<&'a SlotError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoSpinSummary {
    pub rounds_played: u32,
    pub balance: u64,
    pub stop: StopReason,
    pub failed_saves: u32,
}

/// Per-process play context: config, running stats and the random source.
#[derive(Debug, Clone)]
pub struct Session {
    config: GameConfig,
    stats: SessionStats,
    rng: SpinRng,
}

impl Session {
    pub fn new(config: GameConfig, rng: SpinRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            stats: SessionStats::new(),
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Does not touch the balance; callers apply [`RoundOutcome::settle`].
    pub fn play_round(&mut self, balance: u64, bet: Bet) -> Result<RoundOutcome> {
        self.config.limits.check(&bet)?;
        bet.ensure_affordable(balance)?;

        let grid = grid::generate(
            self.config.rows,
            self.config.cols,
            &self.config.symbols,
            &mut self.rng,
        )?;
        let payout = paytable::evaluate(&grid, bet.lines, bet.per_line, &self.config.symbols);
        let outcome = RoundOutcome::new(grid, bet, payout);
        self.stats.record(outcome.net_gain);
        debug!(
            per_line = bet.per_line,
            lines = bet.lines,
            winnings = outcome.winnings,
            net_gain = outcome.net_gain,
            "round played"
        );
        Ok(outcome)
    }

    pub fn auto_spin<S, F>(
        &mut self,
        balance: u64,
        bet: Bet,
        rounds: u32,
        store: &mut S,
        mut on_round: F,
    ) -> Result<AutoSpinSummary>
    where
        S: BalanceStore + ?Sized,
        F: FnMut(RoundReport<'_>),
    {
        self.config.limits.check(&bet)?;
        let mut summary = AutoSpinSummary {
            rounds_played: 0,
            balance,
            stop: StopReason::Completed,
            failed_saves: 0,
        };

        for round in 1..=rounds {
            if summary.balance < self.config.limits.min_bet {
                summary.stop = StopReason::BelowMinimumBet;
                break;
            }
            if !bet.is_affordable(summary.balance) {
                summary.stop = StopReason::CannotCoverBet;
                break;
            }

            let outcome = self.play_round(summary.balance, bet)?;
            summary.balance = outcome.settle(summary.balance);
            summary.rounds_played += 1;

            let persisted = store.save(summary.balance);
            if let Err(e) = &persisted {
                summary.failed_saves += 1;
                warn!(error = %e, balance = summary.balance, "failed to persist balance");
            }
            on_round(RoundReport {
                round,
                rounds,
                outcome: &outcome,
                balance: summary.balance,
                persist_error: persisted.as_ref().err(),
            });
        }
        debug!(?summary, "auto-spin finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBalanceStore;

    fn session(seed: u64) -> Session {
        Session::new(GameConfig::default(), SpinRng::seeded(seed)).unwrap()
    }

    #[test]
    fn test_spin_deterministic() {
        let mut s1 = session(1);
        let mut s2 = session(1);
        let out1 = s1.play_round(100, Bet::new(1, 3)).unwrap();
        let out2 = s2.play_round(100, Bet::new(1, 3)).unwrap();
        assert_eq!(out1, out2);
    }

    #[test]
    fn net_gain_and_stats() {
        let mut s = session(9);
        let mut won = 0u64;
        let mut lost = 0u64;
        for _ in 0..50 {
            let out = s.play_round(1000, Bet::new(2, 3)).unwrap();
            assert_eq!(out.net_gain, out.winnings as i64 - 6);
            assert_eq!(out.settle(1000) as i64, 1000 + out.net_gain);
            if out.net_gain >= 0 {
                won += out.net_gain as u64;
            } else {
                lost += (-out.net_gain) as u64;
            }
        }
        assert_eq!(s.stats().games_played(), 50);
        assert_eq!(s.stats().total_won(), won);
        assert_eq!(s.stats().total_lost(), lost);
    }

    #[test]
    fn rejected_round_leaves_stats_alone() {
        let mut s = session(2);
        assert!(matches!(
            s.play_round(49, Bet::new(50, 1)),
            Err(SlotError::InsufficientFunds {
                total_bet: 50,
                balance: 49
            })
        ));
        assert!(matches!(
            s.play_round(1000, Bet::new(500, 1)),
            Err(SlotError::InvalidBet(_))
        ));
        assert_eq!(s.stats().games_played(), 0);
    }

    #[test]
    fn auto_spin_saves_every_round() {
        let mut s = session(5);
        let mut store = MemoryBalanceStore::new();
        let mut seen = Vec::new();
        let summary = s
            .auto_spin(10_000, Bet::new(1, 1), 20, &mut store, |r| {
                seen.push((r.round, r.balance));
                assert!(r.persist_error.is_none());
            })
            .unwrap();
        assert_eq!(summary.stop, StopReason::Completed);
        assert_eq!(summary.rounds_played, 20);
        assert_eq!(store.saves(), 20);
        assert_eq!(store.load().unwrap(), Some(summary.balance));
        assert_eq!(seen.len(), 20);
        assert_eq!(seen.last().map(|(_, b)| *b), Some(summary.balance));
    }

    #[test]
    fn auto_spin_stops_below_minimum() {
        let mut s = session(5);
        let mut store = MemoryBalanceStore::new();
        let summary = s
            .auto_spin(0, Bet::new(1, 1), 5, &mut store, |_| {})
            .unwrap();
        assert_eq!(summary.rounds_played, 0);
        assert_eq!(summary.stop, StopReason::BelowMinimumBet);
        assert_eq!(store.saves(), 0);
    }

    #[test]
    fn auto_spin_stops_when_bet_not_covered() {
        let mut s = session(5);
        let mut store = MemoryBalanceStore::new();
        let summary = s
            .auto_spin(20, Bet::new(50, 1), 5, &mut store, |_| {})
            .unwrap();
        assert_eq!(summary.stop, StopReason::CannotCoverBet);
        assert_eq!(summary.balance, 20);
    }

    #[test]
    fn net_gain_keeps_sign_on_huge_winnings() {
        let grid = Grid::from_columns(vec![vec![crate::symbols::Symbol::A]]).unwrap();
        let payout = Payout {
            winnings: u64::MAX,
            winning_lines: vec![1],
        };
        let out = RoundOutcome::new(grid, Bet::new(1, 1), payout);
        assert_eq!(out.net_gain, i64::MAX);
        assert_eq!(out.settle(100), u64::MAX);
        let mut stats = SessionStats::new();
        stats.record(out.net_gain);
        assert_eq!(stats.total_lost(), 0);
    }

    struct FailingStore;

    impl BalanceStore for FailingStore {
        fn load(&self) -> Result<Option<u64>> {
            Ok(None)
        }

        fn save(&mut self, _balance: u64) -> Result<()> {
            Err(SlotError::Io {
                path: "balance.txt".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
    }

    #[test]
    fn auto_spin_continues_after_failed_save() {
        let mut s = session(8);
        let mut warnings = 0;
        let summary = s
            .auto_spin(500, Bet::new(1, 1), 3, &mut FailingStore, |r| {
                if r.persist_error.is_some() {
                    warnings += 1;
                }
            })
            .unwrap();
        assert_eq!(summary.rounds_played, 3);
        assert_eq!(summary.failed_saves, 3);
        assert_eq!(warnings, 3);
    }
}
