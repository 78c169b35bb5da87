//! History kept in a single JSON file holding an array of numbers.

use crate::errors::{AppError, AppResult};
use crate::store::HistoryStore;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&mut self) -> AppResult<Vec<f64>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            AppError::Storage(format!("invalid history in {}: {}", self.path.display(), e))
        })
    }

    fn save(&mut self, history: &[f64]) -> AppResult<()> {
        let write = || -> io::Result<()> {
            if let Some(dir) = self.path.parent()
                && !dir.as_os_str().is_empty()
            {
                fs::create_dir_all(dir)?;
            }

            // Write next to the target, then rename over it: readers see
            // either the old record or the new one.
            let tmp = self.tmp_path();
            let json = serde_json::to_string(history).map_err(io::Error::other)?;
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };

        write().map_err(|e| {
            AppError::Storage(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}
