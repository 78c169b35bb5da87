//! ANSI color helper utilities for terminal output.

use crate::core::rates::RateStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Effective rate color:
/// good → green
/// warning → yellow
/// low → red
pub fn color_for_rate(status: RateStatus) -> &'static str {
    match status {
        RateStatus::Good => GREEN,
        RateStatus::Warning => YELLOW,
        RateStatus::Low => RED,
    }
}

pub fn colorize(value: &str, color: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Zero amounts are greyed out.
pub fn colorize_amount(value: f64, formatted: &str) -> String {
    if value == 0.0 {
        colorize(formatted, GREY)
    } else {
        formatted.to_string()
    }
}
