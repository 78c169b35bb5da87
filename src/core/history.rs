use crate::core::estimator::mean;
use crate::core::rates::PayRates;
use crate::errors::{AppError, AppResult};
use crate::store::HistoryStore;
use crate::utils::formatting::{fmt_multiplier, pad_left};
use crate::utils::fs::ensure_writable;
use std::fs;
use std::path::Path;

pub struct HistoryLogic;

impl HistoryLogic {
    /// Render the stored multipliers, oldest first, followed by the
    /// multiplier the next estimate will use.
    pub fn render(history: &[f64], rates: &PayRates) -> String {
        let mut out = String::new();

        if history.is_empty() {
            out.push_str("No calibration recorded yet.\n");
        } else {
            let idx_w = history.len().to_string().len();
            for (i, m) in history.iter().enumerate() {
                out.push_str(&format!(
                    "{}: {}\n",
                    pad_left(&(i + 1).to_string(), idx_w),
                    fmt_multiplier(*m)
                ));
            }
            out.push('\n');
        }

        match mean(history) {
            Some(avg) => out.push_str(&format!(
                "Current deduction multiplier: {} (mean of {} observations)\n",
                fmt_multiplier(avg),
                history.len()
            )),
            None => out.push_str(&format!(
                "Current deduction multiplier: {} (default)\n",
                fmt_multiplier(rates.default_deduction)
            )),
        }

        out
    }

    pub fn print(store: &mut dyn HistoryStore, rates: &PayRates) -> AppResult<()> {
        let history = store.load()?;
        println!("📈 Calibration history:\n");
        print!("{}", Self::render(&history, rates));
        Ok(())
    }

    /// Clear the record; returns how many observations were dropped.
    /// An unreadable record still gets cleared and counts as 0.
    pub fn reset(store: &mut dyn HistoryStore) -> AppResult<usize> {
        let dropped = store.load().map(|h| h.len()).unwrap_or(0);
        store.clear()?;
        Ok(dropped)
    }

    /// Write the history as a JSON array, the same shape as the JSON record.
    pub fn export(store: &mut dyn HistoryStore, path: &Path, force: bool) -> AppResult<usize> {
        let history = store.load()?;
        ensure_writable(path, force)?;

        let json = serde_json::to_string_pretty(&history)?;
        fs::write(path, json)
            .map_err(|e| AppError::Export(format!("cannot write {}: {}", path.display(), e)))?;

        Ok(history.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use std::env;

    #[test]
    fn render_empty_history_shows_default() {
        let out = HistoryLogic::render(&[], &PayRates::default());
        assert!(out.contains("No calibration recorded yet."));
        assert!(out.contains("0.8858 (default)"));
    }

    #[test]
    fn render_lists_entries_and_mean() {
        let out = HistoryLogic::render(&[0.8, 0.9], &PayRates::default());
        assert!(out.contains("1: 0.8000"));
        assert!(out.contains("2: 0.9000"));
        assert!(out.contains("0.8500 (mean of 2 observations)"));
    }

    #[test]
    fn reset_reports_dropped_count() {
        let mut store = MemoryStore::new(vec![0.8, 0.9, 1.0]);
        assert_eq!(HistoryLogic::reset(&mut store).unwrap(), 3);
        assert!(store.history().is_empty());
    }

    #[test]
    fn reset_clears_an_unreadable_record() {
        let mut path = env::temp_dir();
        path.push("history_reset_unreadable_rpaycheck.json");
        fs::write(&path, "[null]").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.load().is_err());

        assert_eq!(HistoryLogic::reset(&mut store).unwrap(), 0);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn export_writes_json_array() {
        let mut path = env::temp_dir();
        path.push("history_export_rpaycheck.json");
        fs::remove_file(&path).ok();

        let mut store = MemoryStore::new(vec![0.8, 0.9]);
        assert_eq!(HistoryLogic::export(&mut store, &path, false).unwrap(), 2);

        let back: Vec<f64> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, vec![0.8, 0.9]);
    }
}
