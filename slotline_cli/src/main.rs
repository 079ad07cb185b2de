use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slotline_core::{
    BalanceStore, FileBalanceStore, GameConfig, Session, SpinRng, DEFAULT_BALANCE_FILE,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod display;
mod menu;
mod prompt;

use menu::App;
use prompt::Prompter;

#[derive(Parser)]
#[command(name = "slotline", about = "Terminal slot machine with a persistent balance")]
struct Cli {
    /// File holding the saved balance
    #[arg(long, value_parser, env = "SLOTLINE_BALANCE_FILE", default_value = DEFAULT_BALANCE_FILE)]
    balance_file: PathBuf,
    /// JSON game configuration; built-in 3x3 machine when omitted
    #[arg(long, value_parser, env = "SLOTLINE_CONFIG")]
    config: Option<PathBuf>,
    /// Seed the random source for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // logs go to stderr so they never interleave with prompts
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load game config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let rng = SpinRng::new(cli.seed);
    info!(seed = ?rng.seed(), "random source ready");
    let session = Session::new(config, rng).context("invalid game configuration")?;

    let store = FileBalanceStore::new(&cli.balance_file);
    let saved = match store.load() {
        Ok(saved) => saved,
        // a corrupt balance is never replaced by a fresh deposit
        Err(e) if e.is_fatal() => {
            return Err(anyhow::Error::new(e).context(format!(
                "refusing to start: repair or remove {}",
                store.path().display()
            )))
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("cannot read saved balance from {}", store.path().display())
            })
        }
    };

    let color = !cli.no_color && io::stdout().is_terminal();
    let prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    let mut app = App::new(session, store, prompter, color);

    if !app.start(saved)? {
        return Ok(());
    }
    app.run()?;
    info!(balance = app.balance(), "session ended");
    Ok(())
}
