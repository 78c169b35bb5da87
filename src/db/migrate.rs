use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Migrations are tracked as `migration_applied` rows in the log table.
fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn migrate_create_calibration_history(conn: &Connection) -> Result<Option<String>> {
    let version = "20261016_0001_create_calibration_history";

    if is_applied(conn, version)? {
        return Ok(None);
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS calibration_history (
            name       TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    mark_applied(conn, version, "Created calibration_history table")?;

    Ok(Some(format!(
        "Migration applied: {} → created 'calibration_history' table",
        version
    )))
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db(). Nothing is printed here: the
/// returned notices are shown by `init` only, other commands may be
/// producing machine-readable output.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<String>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    applied.extend(migrate_create_calibration_history(conn)?);
    Ok(applied)
}
