use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

const MAX_OP_WIDTH: usize = 60;

fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// ANSI color for each operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "calibrate" => Colour::Green,
        "reset" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// Colour the operation word, truncate the visible text to `MAX_OP_WIDTH`
/// and pad it to `width` (padding computed without escape codes).
fn format_op_target(operation: &str, target: &str, width: usize) -> String {
    let color = color_for_operation(operation);

    let visible = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let truncated = if visible.chars().count() > MAX_OP_WIDTH {
        let mut s = visible.chars().take(MAX_OP_WIDTH - 3).collect::<String>();
        s.push_str("...");
        s
    } else {
        visible
    };

    let colored = match truncated.split_once(' ') {
        Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
        None => color.paint(truncated.as_str()).to_string(),
    };

    let padding = " ".repeat(width.saturating_sub(strip_ansi(&colored).chars().count()));
    format!("{colored}{padding}")
}

pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;

        println!("📜 Internal log:\n");

        if entries.is_empty() {
            println!("(empty)");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| {
                let len = e.operation.chars().count();
                if e.target.is_empty() {
                    len
                } else {
                    len + e.target.chars().count() + 3
                }
            })
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        for e in entries {
            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                e.id,
                e.date,
                format_op_target(&e.operation, &e.target, op_w),
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::log::ttlog;

    #[test]
    fn long_targets_are_truncated_without_counting_escapes() {
        let target = "x".repeat(100);
        let out = format_op_target("calibrate", &target, MAX_OP_WIDTH);
        let visible = strip_ansi(&out);
        assert_eq!(visible.chars().count(), MAX_OP_WIDTH);
        assert!(visible.ends_with("..."));
    }

    #[test]
    fn short_entries_are_padded() {
        let out = format_op_target("init", "", 10);
        assert_eq!(strip_ansi(&out), "init      ");
    }

    #[test]
    fn entries_include_migrations_and_ttlog_rows() {
        let pool = DbPool::in_memory().unwrap();
        ttlog(&pool.conn, "calibrate", "80:00", "multiplier 1.0121").unwrap();

        let entries = LogLogic::entries(&pool).unwrap();
        assert!(entries.iter().any(|e| e.operation == "migration_applied"));
        let last = entries.last().unwrap();
        assert_eq!(last.operation, "calibrate");
        assert_eq!(last.target, "80:00");
    }
}
