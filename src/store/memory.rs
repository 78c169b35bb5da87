use crate::errors::AppResult;
use crate::store::HistoryStore;

/// Volatile store, used in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    history: Vec<f64>,
    pub saves: usize,
}

impl MemoryStore {
    pub fn new(history: Vec<f64>) -> Self {
        Self { history, saves: 0 }
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

impl HistoryStore for MemoryStore {
    fn load(&mut self) -> AppResult<Vec<f64>> {
        Ok(self.history.clone())
    }

    fn save(&mut self, history: &[f64]) -> AppResult<()> {
        self.history = history.to_vec();
        self.saves += 1;
        Ok(())
    }
}
