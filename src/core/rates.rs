use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Hourly base rate.
pub const BASE_RATE: f64 = 12.35;
/// Pay factor for hours past the regular threshold.
pub const OVERTIME_MULTIPLIER: f64 = 1.5;
/// Hours paid at the base rate before overtime starts.
pub const REGULAR_HOURS: f64 = 80.0;
/// Deduction multiplier used while the calibration history is empty.
pub const DEFAULT_DEDUCTION: f64 = 0.8858;

/// Lower bound of the "warning" band for the effective rate.
pub const RATE_WARNING_FLOOR: f64 = 11.0;

/// Fixed constants of the pay model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayRates {
    pub base_rate: f64,
    pub overtime_multiplier: f64,
    pub regular_hours: f64,
    pub default_deduction: f64,
}

impl Default for PayRates {
    fn default() -> Self {
        Self {
            base_rate: BASE_RATE,
            overtime_multiplier: OVERTIME_MULTIPLIER,
            regular_hours: REGULAR_HOURS,
            default_deduction: DEFAULT_DEDUCTION,
        }
    }
}

impl From<&Config> for PayRates {
    fn from(cfg: &Config) -> Self {
        Self {
            base_rate: cfg.base_rate,
            overtime_multiplier: cfg.overtime_multiplier,
            regular_hours: cfg.regular_hours,
            default_deduction: cfg.default_deduction,
        }
    }
}

/// How the effective hourly rate compares with the base rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStatus {
    Good,
    Warning,
    Low,
}

impl RateStatus {
    pub fn classify(effective_rate: f64, rates: &PayRates) -> Self {
        if effective_rate >= rates.base_rate {
            RateStatus::Good
        } else if effective_rate >= RATE_WARNING_FLOOR {
            RateStatus::Warning
        } else {
            RateStatus::Low
        }
    }
}
