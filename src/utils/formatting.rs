//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

pub fn pad_left(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// es: $1173.25
pub fn fmt_money(value: f64) -> String {
    format!("${:.2}", value)
}

/// es: $11.12/hr
pub fn fmt_rate(value: f64) -> String {
    format!("${:.2}/hr", value)
}

pub fn fmt_multiplier(value: f64) -> String {
    format!("{:.4}", value)
}

/// Decimal hours plus the HHh MMm reading, es: 42.500 (42h 30m)
pub fn fmt_hours(value: f64, decimals: usize) -> String {
    let total_mins = (value * 60.0).round() as i64;
    format!(
        "{:.decimals$} ({:02}h {:02}m)",
        value,
        total_mins / 60,
        total_mins % 60,
        decimals = decimals
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_and_rates() {
        assert_eq!(fmt_money(1173.25), "$1173.25");
        assert_eq!(fmt_money(0.0), "$0.00");
        assert_eq!(fmt_rate(11.118), "$11.12/hr");
        assert_eq!(fmt_multiplier(1000.0 / 988.0), "1.0121");
    }

    #[test]
    fn hours_show_minutes() {
        assert_eq!(fmt_hours(42.5, 3), "42.500 (42h 30m)");
        assert_eq!(fmt_hours(37.0 + 25.0 / 60.0, 3), "37.417 (37h 25m)");
        assert_eq!(fmt_hours(0.0, 2), "0.00 (00h 00m)");
    }
}
