use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

/// Initialize the database.
/// Delegates all schema creation / upgrades to the migration engine and
/// returns the notices of the migrations that were applied.
pub fn init_db(conn: &Connection) -> AppResult<Vec<String>> {
    run_pending_migrations(conn).map_err(|e| AppError::Migration(e.to_string()))
}
