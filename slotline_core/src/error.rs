use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlotError>;

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("invalid bet: {0}")]
    InvalidBet(String),
    #[error("insufficient funds: total bet ${total_bet} exceeds balance ${balance}")]
    InsufficientFunds { total_bet: u64, balance: u64 },
    #[error("symbol pool holds {pool_size} symbols, cannot fill {rows} rows")]
    InsufficientPool { rows: usize, pool_size: usize },
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
    #[error("stored balance in {path} is corrupt: {contents:?}")]
    CorruptBalance { path: PathBuf, contents: String },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl SlotError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Errors that must abort startup rather than be recovered by re-prompting.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPool { .. }
                | Self::InvalidConfig(_)
                | Self::CorruptBalance { .. }
                | Self::ConfigParse(_)
        )
    }
}
