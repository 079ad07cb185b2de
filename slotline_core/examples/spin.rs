use slotline_core::{Bet, GameConfig, Session, SpinRng};

fn main() -> slotline_core::Result<()> {
    // Example end-to-end spin
    let mut session = Session::new(GameConfig::default(), SpinRng::seeded(1))?;
    let balance = 100;
    let outcome = session.play_round(balance, Bet::new(5, 3))?;
    print!("{}", outcome.grid);
    println!(
        "winnings={} lines={:?} net_gain={} balance={}",
        outcome.winnings,
        outcome.winning_lines,
        outcome.net_gain,
        outcome.settle(balance)
    );
    Ok(())
}
