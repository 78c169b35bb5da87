//! History kept as a named row of the `calibration_history` table.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::store::{HISTORY_RECORD, HistoryStore, UpdateFn};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, params};
use std::path::Path;

pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = DbPool::new(path).map_err(|e| {
            AppError::Storage(format!("cannot open {}: {}", path.display(), e))
        })?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }
}

fn storage_err(action: &str, e: impl std::fmt::Display) -> AppError {
    AppError::Storage(format!("cannot {} history record: {}", action, e))
}

fn read_record(conn: &Connection) -> AppResult<Vec<f64>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value FROM calibration_history WHERE name = ?1",
            [HISTORY_RECORD],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| storage_err("read", e))?;

    match raw {
        None => Ok(Vec::new()),
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| AppError::Storage(format!("invalid history record: {}", e))),
    }
}

fn write_record(conn: &Connection, history: &[f64]) -> AppResult<()> {
    let json = serde_json::to_string(history).map_err(|e| storage_err("encode", e))?;
    conn.execute(
        "INSERT INTO calibration_history (name, value, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![HISTORY_RECORD, json, Local::now().to_rfc3339()],
    )
    .map_err(|e| storage_err("write", e))?;
    Ok(())
}

impl HistoryStore for SqliteStore {
    fn load(&mut self) -> AppResult<Vec<f64>> {
        read_record(&self.pool.conn)
    }

    fn save(&mut self, history: &[f64]) -> AppResult<()> {
        write_record(&self.pool.conn, history)
    }

    /// The whole read-modify-write runs under one IMMEDIATE transaction, so
    /// two processes calibrating against the same database cannot lose an
    /// observation.
    fn update(&mut self, f: &mut UpdateFn<'_>) -> AppResult<()> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| storage_err("lock", e))?;

        let history = read_record(&tx)?;
        if let Some(next) = f(&history)? {
            write_record(&tx, &next)?;
        }

        tx.commit().map_err(|e| storage_err("commit", e))?;
        Ok(())
    }
}
