use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::estimator::{PayEstimate, PayEstimator};
use crate::core::rates::PayRates;
use crate::db::log::ttlog_best_effort;
use crate::errors::{AppError, AppResult};
use crate::store;
use crate::ui::messages::success;
use crate::utils::colors::{color_for_rate, colorize, colorize_amount};
use crate::utils::formatting::{
    bold, fmt_hours, fmt_money, fmt_multiplier, fmt_rate, pad_right,
};

const LABEL_W: usize = 18;

/// Observed net pay must be a real, non-negative amount.
pub fn validate_net(net: Option<f64>) -> AppResult<Option<f64>> {
    match net {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::InvalidAmount(format!(
            "net pay must be a non-negative number (found {})",
            v
        ))),
        other => Ok(other),
    }
}

fn line(label: &str, value: &str) -> String {
    format!("{} {}\n", pad_right(&format!("{}:", label), LABEL_W), value)
}

/// Human-readable report of an estimate.
pub fn render(est: &PayEstimate) -> String {
    let mut out = String::new();

    out.push_str(&bold("📊 Paycheck Results"));
    out.push_str("\n\n");

    out.push_str(&line("Gross Pay", &fmt_money(est.gross)));
    out.push_str(&line("Estimated Net", &fmt_money(est.net)));
    out.push_str(&line(
        "Effective Rate",
        &colorize(&fmt_rate(est.effective_rate), color_for_rate(est.rate_status)),
    ));
    out.push('\n');

    out.push_str(&line("Converted Hours", &fmt_hours(est.total_hours, 3)));
    out.push_str(&line("Regular Hours", &fmt_hours(est.regular_hours, 2)));
    out.push_str(&line(
        "Overtime Hours",
        &colorize_amount(est.overtime_hours, &fmt_hours(est.overtime_hours, 2)),
    ));
    out.push('\n');

    out.push_str(&line("Deduction", &fmt_multiplier(est.deduction)));

    if let Some(m) = est.actual_multiplier {
        out.push('\n');
        out.push_str(&bold("🎯 Calibration Update"));
        out.push('\n');
        out.push_str(&line("Actual Multiplier", &fmt_multiplier(m)));
        out.push_str(&line(
            "Observations",
            &est.updated_history.len().to_string(),
        ));
    }

    out
}

/// Handle the `estimate` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Estimate { hours, net, json } = cmd {
        let observed = validate_net(*net)?;
        let rates = PayRates::from(cfg);

        let mut history = store::open(cfg)?;
        let est = PayEstimator::new(history.as_mut(), rates).estimate(hours, observed)?;

        if let Some(m) = est.actual_multiplier {
            ttlog_best_effort(
                cfg,
                "calibrate",
                hours,
                &format!(
                    "net {} on gross {} → multiplier {}",
                    fmt_money(observed.unwrap_or_default()),
                    fmt_money(est.gross),
                    fmt_multiplier(m)
                ),
            );
        }

        if *json {
            println!("{}", serde_json::to_string_pretty(&est)?);
            return Ok(());
        }

        print!("{}", render(&est));
        if est.actual_multiplier.is_some() {
            println!();
            success("History updated");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::estimator::estimate;

    #[test]
    fn negative_or_non_finite_net_is_rejected() {
        assert!(validate_net(Some(-1.0)).is_err());
        assert!(validate_net(Some(f64::NAN)).is_err());
        assert!(validate_net(Some(f64::INFINITY)).is_err());
        assert_eq!(validate_net(Some(0.0)).unwrap(), Some(0.0));
        assert_eq!(validate_net(None).unwrap(), None);
    }

    #[test]
    fn report_shows_core_figures() {
        let est = estimate("90:00", &[], None, &PayRates::default()).unwrap();
        let out = render(&est);
        assert!(out.contains("$1173.25"));
        assert!(out.contains("0.8858"));
        assert!(out.contains("90.000 (90h 00m)"));
        assert!(!out.contains("Calibration Update"));
    }

    #[test]
    fn report_shows_calibration_block() {
        let est = estimate("80", &[], Some(1000.0), &PayRates::default()).unwrap();
        let out = render(&est);
        assert!(out.contains("Calibration Update"));
        assert!(out.contains("1.0121"));
    }
}
