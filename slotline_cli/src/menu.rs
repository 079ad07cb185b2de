use std::io::{self, BufRead, Write};
use std::str::FromStr;

use slotline_core::{BalanceStore, Bet, Session, SlotError, StopReason};
use tracing::{info, warn};

use crate::display::{render_outcome, render_stats};
use crate::prompt::Prompter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Play,
    AutoSpin,
    Stats,
    Deposit,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" => Ok(Self::Play),
            "2" => Ok(Self::AutoSpin),
            "3" => Ok(Self::Stats),
            "4" => Ok(Self::Deposit),
            "q" => Ok(Self::Quit),
            other => Err(format!("unknown option {other:?}")),
        }
    }
}

/// The interactive session: owns the balance and writes it through the store
/// after every change.
pub struct App<S, R, W> {
    session: Session,
    store: S,
    balance: u64,
    prompter: Prompter<R, W>,
    color: bool,
}

fn is_eof(e: &io::Error) -> bool {
    e.kind() == io::ErrorKind::UnexpectedEof
}

impl<S: BalanceStore, R: BufRead, W: Write> App<S, R, W> {
    pub fn new(session: Session, store: S, prompter: Prompter<R, W>, color: bool) -> Self {
        Self {
            session,
            store,
            balance: 0,
            prompter,
            color,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (Session, S, W) {
        (self.session, self.store, self.prompter.into_output())
    }

    /// Resume from a saved balance or ask for a first deposit.
    /// Returns `false` if input closed before a balance was established.
    pub fn start(&mut self, saved: Option<u64>) -> io::Result<bool> {
        match saved {
            Some(balance) => {
                self.balance = balance;
                writeln!(self.prompter.output(), "Loaded saved balance: ${balance}")?;
            }
            None => match self.prompter.ask_deposit() {
                Ok(amount) => {
                    self.balance = amount;
                    self.persist()?;
                }
                Err(e) if is_eof(&e) => return Ok(false),
                Err(e) => return Err(e),
            },
        }
        Ok(true)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let step = self
                .prompter
                .ask_choice()
                .and_then(|choice| self.handle(choice));
            match step {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if is_eof(&e) => break,
                Err(e) => return Err(e),
            }
        }
        self.quit()
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let out = self.prompter.output();
        writeln!(out, "\n💰 Balance: ${}", self.balance)?;
        writeln!(out, "1. Play")?;
        writeln!(out, "2. Auto-spin")?;
        writeln!(out, "3. Show stats")?;
        writeln!(out, "4. Deposit")?;
        writeln!(out, "q. Quit")
    }

    /// Returns `false` when the player asked to quit.
    fn handle(&mut self, choice: MenuChoice) -> io::Result<bool> {
        match choice {
            MenuChoice::Play => self.play_once()?,
            MenuChoice::AutoSpin => self.auto_spin()?,
            MenuChoice::Stats => {
                let stats = render_stats(self.session.stats());
                write!(self.prompter.output(), "{stats}")?;
            }
            MenuChoice::Deposit => {
                let amount = self.prompter.ask_deposit()?;
                self.balance = self.balance.saturating_add(amount);
                self.persist()?;
            }
            MenuChoice::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn can_play(&mut self) -> io::Result<bool> {
        if self.balance < self.session.config().limits.min_bet {
            writeln!(
                self.prompter.output(),
                "Not enough balance to play. Deposit more funds (option 4)."
            )?;
            return Ok(false);
        }
        Ok(true)
    }

    fn play_once(&mut self) -> io::Result<()> {
        if !self.can_play()? {
            return Ok(());
        }
        let limits = self.session.config().limits;
        let bet = self.prompter.ask_bet(&limits, self.balance)?;
        writeln!(
            self.prompter.output(),
            "Betting ${} on {} lines. Total bet: ${}",
            bet.per_line,
            bet.lines,
            bet.total()
        )?;
        let outcome = match self.session.play_round(self.balance, bet) {
            Ok(outcome) => outcome,
            Err(e) => return self.report_rejected(e),
        };
        let text = render_outcome(
            &outcome,
            self.session.config().jackpot_multiplier,
            self.color,
        );
        write!(self.prompter.output(), "{text}")?;
        self.balance = outcome.settle(self.balance);
        self.persist()
    }

    fn auto_spin(&mut self) -> io::Result<()> {
        if !self.can_play()? {
            return Ok(());
        }
        let rounds = self.prompter.ask_rounds()?;
        let limits = self.session.config().limits;
        let bet: Bet = self.prompter.ask_bet(&limits, self.balance)?;
        writeln!(self.prompter.output(), "Auto-spinning {rounds} rounds at {bet}")?;

        let jackpot_multiplier = self.session.config().jackpot_multiplier;
        let color = self.color;
        let prompter = &mut self.prompter;
        let mut written: io::Result<()> = Ok(());
        let result = self.session.auto_spin(
            self.balance,
            bet,
            rounds,
            &mut self.store,
            |report| {
                if written.is_err() {
                    return;
                }
                let out = prompter.output();
                let mut text = format!("\n🔁 Auto-spin round {}/{}\n", report.round, report.rounds);
                text.push_str(&render_outcome(report.outcome, jackpot_multiplier, color));
                text.push_str(&format!("Balance: ${}\n", report.balance));
                if let Some(e) = report.persist_error {
                    text.push_str(&format!("Warning: balance not saved: {e}\n"));
                }
                written = out.write_all(text.as_bytes());
            },
        );
        let summary = match result {
            Ok(summary) => summary,
            Err(e) => return self.report_rejected(e),
        };
        self.balance = summary.balance;
        written?;
        match summary.stop {
            StopReason::Completed => {}
            StopReason::BelowMinimumBet | StopReason::CannotCoverBet => {
                writeln!(self.prompter.output(), "Not enough balance to continue.")?;
            }
        }
        info!(
            rounds_played = summary.rounds_played,
            balance = summary.balance,
            "auto-spin batch done"
        );
        Ok(())
    }

    fn report_rejected(&mut self, e: SlotError) -> io::Result<()> {
        warn!(error = %e, "round rejected");
        writeln!(self.prompter.output(), "{e}")
    }

    /// Save the current balance. A failed save is reported, not fatal: the
    /// in-memory balance stays authoritative for the rest of the session.
    fn persist(&mut self) -> io::Result<()> {
        if let Err(e) = self.store.save(self.balance) {
            warn!(error = %e, balance = self.balance, "failed to persist balance");
            writeln!(
                self.prompter.output(),
                "Warning: balance not saved: {e}"
            )?;
        }
        Ok(())
    }

    fn quit(&mut self) -> io::Result<()> {
        writeln!(
            self.prompter.output(),
            "\n👋 Thanks for playing! Final balance: ${}",
            self.balance
        )?;
        self.persist()?;
        let stats = render_stats(self.session.stats());
        write!(self.prompter.output(), "{stats}")?;
        self.prompter.output().flush()
    }
}
