//! Calibration history storage.
//!
//! The history is a single named record holding the list of past
//! multipliers. Every write replaces the whole record.

pub mod json;
pub mod memory;
pub mod sqlite;

use crate::config::{Config, StorageKind};
use crate::errors::AppResult;

pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Name of the persisted record.
pub const HISTORY_RECORD: &str = "deduction_history";

/// Callback used by [`HistoryStore::update`]: returns the new sequence to
/// persist, or `None` to leave the record untouched.
pub type UpdateFn<'a> = dyn FnMut(&[f64]) -> AppResult<Option<Vec<f64>>> + 'a;

pub trait HistoryStore {
    /// Persisted history; an absent record is an empty history.
    fn load(&mut self) -> AppResult<Vec<f64>>;

    /// Overwrite the record with `history`.
    fn save(&mut self, history: &[f64]) -> AppResult<()>;

    /// Load, hand the history to `f`, save what it returns.
    fn update(&mut self, f: &mut UpdateFn<'_>) -> AppResult<()> {
        let history = self.load()?;
        if let Some(next) = f(&history)? {
            self.save(&next)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.save(&[])
    }
}

/// Open the store selected by the configuration.
pub fn open(cfg: &Config) -> AppResult<Box<dyn HistoryStore>> {
    Ok(match cfg.storage {
        StorageKind::Sqlite => Box::new(SqliteStore::open(&cfg.database_path())?),
        StorageKind::Json => Box::new(JsonFileStore::new(cfg.history_file_path())),
    })
}
