pub mod bet;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod rng;
pub mod stats;
pub mod store;
pub mod symbols;

pub use crate::bet::{Bet, BetLimits};
pub use crate::config::GameConfig;
pub use crate::engine::{AutoSpinSummary, RoundOutcome, RoundReport, Session, StopReason};
pub use crate::error::{Result, SlotError};
pub use crate::grid::{generate, Grid};
pub use crate::paytable::{evaluate, Payout};
pub use crate::rng::SpinRng;
pub use crate::stats::SessionStats;
pub use crate::store::{BalanceStore, FileBalanceStore, MemoryBalanceStore, DEFAULT_BALANCE_FILE};
pub use crate::symbols::{Symbol, SymbolSpec, SymbolTable};
