//! SQLite connection wrapper (lightweight for CLI usage).

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    /// Notices of the migrations applied while opening.
    pub applied: Vec<String>,
}

impl DbPool {
    /// Open (or create) the database and bring its schema up to date.
    pub fn new(path: &Path) -> AppResult<Self> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let conn = Connection::open(path)?;
        let applied = init_db(&conn)?;
        Ok(Self { conn, applied })
    }

    #[cfg(test)]
    pub fn in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        let applied = init_db(&conn)?;
        Ok(Self { conn, applied })
    }
}
