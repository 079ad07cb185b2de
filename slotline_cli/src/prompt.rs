use std::io::{self, BufRead, Write};

use slotline_core::{Bet, BetLimits};

use crate::menu::MenuChoice;

// End of input surfaces as ErrorKind::UnexpectedEof.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_string())
    }

    fn ask_number(&mut self, prompt: &str, retry: &str) -> io::Result<u64> {
        loop {
            let answer = self.read_line(prompt)?;
            if !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(n) = answer.parse::<u64>() {
                    return Ok(n);
                }
            }
            writeln!(self.output, "{retry}")?;
        }
    }

    pub fn ask_deposit(&mut self) -> io::Result<u64> {
        loop {
            let amount = self.ask_number(
                "What would you like to deposit? $",
                "Please enter a positive number.",
            )?;
            if amount > 0 {
                return Ok(amount);
            }
            writeln!(self.output, "Please enter a positive number.")?;
        }
    }

    pub fn ask_lines(&mut self, max_lines: usize) -> io::Result<usize> {
        let prompt = format!("Enter the number of lines to bet on (1-{max_lines}): ");
        loop {
            let lines = self.ask_number(&prompt, "Please enter a valid number.")?;
            if (1..=max_lines as u64).contains(&lines) {
                return Ok(lines as usize);
            }
            writeln!(self.output, "Please enter a valid number.")?;
        }
    }

    pub fn ask_per_line(&mut self, limits: &BetLimits) -> io::Result<u64> {
        loop {
            let amount = self.ask_number(
                "What would you like to bet on each line? $",
                "Please enter a number.",
            )?;
            match limits.check_per_line(amount) {
                Ok(()) => return Ok(amount),
                Err(_) => writeln!(
                    self.output,
                    "Bet must be between ${} and ${}.",
                    limits.min_bet, limits.max_bet
                )?,
            }
        }
    }

    pub fn ask_bet(&mut self, limits: &BetLimits, balance: u64) -> io::Result<Bet> {
        // only offer line counts the minimum bet can cover
        let affordable_lines = (balance / limits.min_bet.max(1)).min(limits.max_lines as u64);
        let lines = self.ask_lines((affordable_lines as usize).max(1))?;
        loop {
            let bet = Bet::new(self.ask_per_line(limits)?, lines);
            if bet.is_affordable(balance) {
                return Ok(bet);
            }
            writeln!(self.output, "Insufficient funds. Current balance: ${balance}")?;
        }
    }

    pub fn ask_rounds(&mut self) -> io::Result<u32> {
        loop {
            let rounds = self.ask_number(
                "How many rounds would you like to auto-spin? ",
                "Please enter a valid number.",
            )?;
            match u32::try_from(rounds) {
                Ok(n) if n > 0 => return Ok(n),
                _ => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }

    pub fn ask_choice(&mut self) -> io::Result<MenuChoice> {
        loop {
            let answer = self.read_line("Choose an option: ")?;
            match answer.parse::<MenuChoice>() {
                Ok(choice) => return Ok(choice),
                Err(_) => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn deposit_reprompts_until_positive() {
        let mut p = prompter("abc\n0\n-3\n 40 \n");
        assert_eq!(p.ask_deposit().unwrap(), 40);
        let out = output(p);
        assert_eq!(out.matches("Please enter a positive number.").count(), 3);
    }

    #[test]
    fn lines_must_be_in_range() {
        let mut p = prompter("0\n4\n2\n");
        assert_eq!(p.ask_lines(3).unwrap(), 2);
        assert_eq!(output(p).matches("Please enter a valid number.").count(), 2);
    }

    #[test]
    fn per_line_bet_respects_limits() {
        let mut p = prompter("x\n0\n101\n100\n");
        assert_eq!(p.ask_per_line(&BetLimits::default()).unwrap(), 100);
        let out = output(p);
        assert!(out.contains("Please enter a number."));
        assert_eq!(out.matches("Bet must be between $1 and $100.").count(), 2);
    }

    #[test]
    fn bet_reprompts_on_insufficient_funds() {
        let mut p = prompter("1\n50\n49\n");
        let bet = p.ask_bet(&BetLimits::default(), 49).unwrap();
        assert_eq!(bet, Bet::new(49, 1));
        assert!(output(p).contains("Insufficient funds. Current balance: $49"));
    }

    #[test]
    fn bet_lines_narrowed_to_balance() {
        let mut p = prompter("3\n2\n1\n");
        let bet = p.ask_bet(&BetLimits::default(), 2).unwrap();
        assert_eq!(bet, Bet::new(1, 2));
        assert!(output(p).contains("(1-2)"));
    }

    #[test]
    fn choice_parsing() {
        let mut p = prompter("9\n Q \n");
        assert_eq!(p.ask_choice().unwrap(), MenuChoice::Quit);
        assert!(output(p).contains("Invalid choice."));
    }

    #[test]
    fn eof_is_reported() {
        let mut p = prompter("");
        let err = p.ask_rounds().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
