use crossterm::style::Stylize;
use slotline_core::{Grid, RoundOutcome, SessionStats};

/// Jackpot is cosmetic only; it never changes what a round pays.
pub fn is_jackpot(winnings: u64, per_line: u64, multiplier: u64) -> bool {
    winnings > 0 && winnings >= per_line.saturating_mul(multiplier)
}

/// Row-major rendering with ` | ` between columns. Rows listed in
/// `winning_lines` (1-based) are highlighted when `color` is set.
pub fn render_grid(grid: &Grid, winning_lines: &[usize], color: bool) -> String {
    let mut out = String::new();
    for row in 0..grid.rows() {
        let won = winning_lines.contains(&(row + 1));
        let cells: Vec<String> = grid
            .row(row)
            .map(|s| {
                if color && won {
                    s.to_string().green().to_string()
                } else {
                    s.to_string()
                }
            })
            .collect();
        out.push_str(&cells.join(" | "));
        out.push('\n');
    }
    out
}

pub fn render_outcome(outcome: &RoundOutcome, jackpot_multiplier: u64, color: bool) -> String {
    let mut out = render_grid(&outcome.grid, &outcome.winning_lines, color);
    out.push_str(&format!("You won ${}.\n", outcome.winnings));
    if is_jackpot(outcome.winnings, outcome.bet.per_line, jackpot_multiplier) {
        let banner = "🎉 JACKPOT! Big win! 🎉";
        if color {
            out.push_str(&banner.yellow().to_string());
        } else {
            out.push_str(banner);
        }
        out.push('\n');
    }
    if outcome.winning_lines.is_empty() {
        out.push_str("No winning lines.\n");
    } else {
        let lines: Vec<String> = outcome.winning_lines.iter().map(|l| l.to_string()).collect();
        out.push_str(&format!("Winning lines: {}\n", lines.join(" ")));
    }
    out
}

pub fn render_stats(stats: &SessionStats) -> String {
    format!("\n📊 Game Statistics:\n{stats}\n")
}
