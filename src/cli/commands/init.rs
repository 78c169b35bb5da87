use crate::config::{Config, StorageKind};
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

use crate::cli::parser::Cli;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.clone(), cli.test)?;
    if let Some(storage) = cli.storage {
        cfg.storage = storage;
    }
    if let Some(file) = &cli.history_file {
        cfg.history_file = file.clone();
    }

    let db_path = cfg.database_path();

    println!("⚙️  Initializing rPaycheck…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_path.display());
    if cfg.storage == StorageKind::Json {
        println!("📈 History    : {}", cfg.history_file_path().display());
    }

    let pool = DbPool::new(&db_path)?;
    for notice in &pool.applied {
        success(notice);
    }

    println!("✅ Database initialized at {}", db_path.display());

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_path.display()),
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rPaycheck initialization completed!");
    Ok(())
}
