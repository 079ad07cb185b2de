use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SlotError};

pub const DEFAULT_BALANCE_FILE: &str = "balance.txt";

pub trait BalanceStore {
    fn load(&self) -> Result<Option<u64>>;
    fn save(&mut self, balance: u64) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileBalanceStore {
    path: PathBuf,
}

impl FileBalanceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_BALANCE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileBalanceStore {
    fn default() -> Self {
        Self::new(DEFAULT_BALANCE_FILE)
    }
}

pub fn parse_balance(path: &Path, contents: &str) -> Result<u64> {
    contents
        .trim()
        .parse::<u64>()
        .map_err(|_| SlotError::CorruptBalance {
            path: path.to_path_buf(),
            contents: contents.to_string(),
        })
}

impl BalanceStore for FileBalanceStore {
    fn load(&self) -> Result<Option<u64>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved balance");
                return Ok(None);
            }
            Err(e) => return Err(SlotError::io(&self.path, e)),
        };
        let contents = std::str::from_utf8(&bytes).map_err(|_| SlotError::CorruptBalance {
            path: self.path.clone(),
            contents: String::from_utf8_lossy(&bytes).into_owned(),
        })?;
        let balance = parse_balance(&self.path, contents)?;
        info!(path = %self.path.display(), balance, "loaded balance");
        Ok(Some(balance))
    }

    fn save(&mut self, balance: u64) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SlotError::io(parent, e))?;
        }
        // write a sibling then rename so a crash never leaves a half-written balance
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp).map_err(|e| SlotError::io(&tmp, e))?;
        file.write_all(balance.to_string().as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| SlotError::io(&tmp, e))?;
        drop(file);
        fs::rename(&tmp, &self.path).map_err(|e| SlotError::io(&self.path, e))?;
        info!(path = %self.path.display(), balance, "saved balance");
        Ok(())
    }
}

// In-process store, nothing hits disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryBalanceStore {
    balance: Option<u64>,
    saves: usize,
}

impl MemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance: Some(balance),
            saves: 0,
        }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl BalanceStore for MemoryBalanceStore {
    fn load(&self) -> Result<Option<u64>> {
        Ok(self.balance)
    }

    fn save(&mut self, balance: u64) -> Result<()> {
        self.balance = Some(balance);
        self.saves += 1;
        Ok(())
    }
}
