//! Paycheck estimation and calibration.

use crate::core::hours::parse_hours;
use crate::core::rates::{PayRates, RateStatus};
use crate::errors::{AppError, AppResult};
use crate::store::HistoryStore;
use serde::Serialize;

/// Result of one estimate request. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayEstimate {
    pub hours_input: String,
    pub total_hours: f64,
    pub regular_hours: f64,
    pub overtime_hours: f64,
    pub gross: f64,
    pub net: f64,
    pub deduction: f64,
    pub effective_rate: f64,
    pub rate_status: RateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_multiplier: Option<f64>,
    pub updated_history: Vec<f64>,
}

/// Arithmetic mean of the history, `None` when empty.
pub fn mean(history: &[f64]) -> Option<f64> {
    if history.is_empty() {
        None
    } else {
        Some(history.iter().sum::<f64>() / history.len() as f64)
    }
}

/// Current deduction multiplier for a history snapshot.
pub fn deduction_multiplier(history: &[f64], rates: &PayRates) -> f64 {
    mean(history).unwrap_or(rates.default_deduction)
}

/// Split total hours into (regular, overtime).
pub fn split_hours(total_hours: f64, rates: &PayRates) -> (f64, f64) {
    let regular = total_hours.min(rates.regular_hours);
    let overtime = (total_hours - rates.regular_hours).max(0.0);
    (regular, overtime)
}

pub fn gross_pay(regular_hours: f64, overtime_hours: f64, rates: &PayRates) -> f64 {
    regular_hours * rates.base_rate
        + overtime_hours * rates.base_rate * rates.overtime_multiplier
}

/// Pure estimate for a history snapshot.
///
/// When `observed_net` is present the implied multiplier is appended to a
/// copy of `history` and returned in `updated_history`; persisting it is up
/// to the caller.
pub fn estimate(
    hours_input: &str,
    history: &[f64],
    observed_net: Option<f64>,
    rates: &PayRates,
) -> AppResult<PayEstimate> {
    let total_hours = parse_hours(hours_input)?;
    let (regular_hours, overtime_hours) = split_hours(total_hours, rates);
    let gross = gross_pay(regular_hours, overtime_hours, rates);

    let deduction = deduction_multiplier(history, rates);
    let net = gross * deduction;
    let effective_rate = if total_hours > 0.0 {
        net / total_hours
    } else {
        0.0
    };

    let actual_multiplier = observed_net.map(|observed| {
        if gross > 0.0 {
            observed / gross
        } else {
            deduction
        }
    });

    let mut updated_history = history.to_vec();
    if let Some(m) = actual_multiplier {
        // JSON has no representation for inf/NaN: a non-finite value would
        // make the stored record unreadable.
        if !m.is_finite() {
            return Err(AppError::InvalidAmount(format!(
                "net pay {} gives a non-finite multiplier on gross {}",
                observed_net.unwrap_or_default(),
                gross
            )));
        }
        updated_history.push(m);
    }

    Ok(PayEstimate {
        hours_input: hours_input.to_string(),
        total_hours,
        regular_hours,
        overtime_hours,
        gross,
        net,
        deduction,
        effective_rate,
        rate_status: RateStatus::classify(effective_rate, rates),
        actual_multiplier,
        updated_history,
    })
}

/// Estimator bound to a caller-owned history store.
pub struct PayEstimator<'a> {
    store: &'a mut dyn HistoryStore,
    rates: PayRates,
}

impl<'a> PayEstimator<'a> {
    pub fn new(store: &'a mut dyn HistoryStore, rates: PayRates) -> Self {
        Self { store, rates }
    }

    /// Read history, estimate, and persist the new multiplier when an
    /// observation is supplied. Read-only calls never write.
    pub fn estimate(
        &mut self,
        hours_input: &str,
        observed_net: Option<f64>,
    ) -> AppResult<PayEstimate> {
        let rates = self.rates;

        if observed_net.is_none() {
            let history = self.store.load()?;
            return estimate(hours_input, &history, None, &rates);
        }

        let mut result = None;
        self.store.update(&mut |history| {
            let est = estimate(hours_input, history, observed_net, &rates)?;
            let next = est.updated_history.clone();
            result = Some(est);
            Ok(Some(next))
        })?;

        result.ok_or_else(|| AppError::Storage("history update did not run".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn rates() -> PayRates {
        PayRates::default()
    }

    #[test]
    fn empty_history_uses_default_deduction() {
        let est = estimate("40:00", &[], None, &rates()).unwrap();
        assert_eq!(est.deduction, 0.8858);
        assert!(est.actual_multiplier.is_none());
        assert!(est.updated_history.is_empty());
    }

    #[test]
    fn deduction_is_rolling_mean() {
        let est = estimate("40", &[0.80, 0.90], None, &rates()).unwrap();
        assert!(approx(est.deduction, 0.85));

        let x = 0.95;
        let est = estimate("40", &[0.80, 0.90, x], None, &rates()).unwrap();
        assert!(approx(est.deduction, (0.80 + 0.90 + x) / 3.0));
    }

    #[test]
    fn gross_with_overtime() {
        let est = estimate("90:00", &[], None, &rates()).unwrap();
        assert_eq!(est.regular_hours, 80.0);
        assert_eq!(est.overtime_hours, 10.0);
        assert!(approx(est.gross, 988.0 + 185.25));
        assert!(approx(est.gross, 1173.25));
    }

    #[test]
    fn split_preserves_total() {
        for total in [0.0, 12.5, 79.99, 80.0, 80.01, 120.0] {
            let (regular, overtime) = split_hours(total, &rates());
            assert!(approx(regular + overtime, total));
            assert!(regular <= 80.0);
            assert!(overtime >= 0.0);
            assert_eq!(overtime > 0.0, total > 80.0);
        }
    }

    #[test]
    fn zero_hours_has_zero_rate() {
        let est = estimate("0:00", &[], None, &rates()).unwrap();
        assert_eq!(est.total_hours, 0.0);
        assert_eq!(est.gross, 0.0);
        assert_eq!(est.effective_rate, 0.0);
        assert_eq!(est.rate_status, RateStatus::Low);
    }

    #[test]
    fn zero_gross_calibration_falls_back_to_deduction() {
        let est = estimate("0", &[0.8, 0.9], Some(500.0), &rates()).unwrap();
        assert!(approx(est.actual_multiplier.unwrap(), 0.85));
        assert_eq!(est.updated_history.len(), 3);
    }

    #[test]
    fn observed_zero_is_still_an_observation() {
        let est = estimate("80", &[], Some(0.0), &rates()).unwrap();
        assert_eq!(est.actual_multiplier, Some(0.0));
        assert_eq!(est.updated_history, vec![0.0]);
    }

    #[test]
    fn overflowing_multiplier_is_rejected() {
        // 0:01 → gross ≈ 0.2058, 1e308 / 0.2058 overflows to inf
        let res = estimate("0:01", &[0.8], Some(1e308), &rates());
        assert!(matches!(res, Err(AppError::InvalidAmount(_))));
    }

    #[test]
    fn overflowing_multiplier_is_never_persisted() {
        let mut store = MemoryStore::new(vec![0.8]);
        let res = PayEstimator::new(&mut store, rates()).estimate("0:01", Some(1e308));
        assert!(matches!(res, Err(AppError::InvalidAmount(_))));
        assert_eq!(store.saves, 0);
        assert_eq!(store.history(), &[0.8]);
    }

    #[test]
    fn effective_rate_is_net_per_hour() {
        let est = estimate("42:30", &[0.9], None, &rates()).unwrap();
        assert!(approx(est.net, 42.5 * 12.35 * 0.9));
        assert!(approx(est.effective_rate, 12.35 * 0.9));
        assert_eq!(est.rate_status, RateStatus::Warning);
    }

    #[test]
    fn rates_come_from_config_values() {
        let custom = PayRates {
            base_rate: 20.0,
            overtime_multiplier: 2.0,
            regular_hours: 40.0,
            default_deduction: 0.5,
        };
        let est = estimate("50", &[], None, &custom).unwrap();
        assert!(approx(est.gross, 40.0 * 20.0 + 10.0 * 40.0));
        assert!(approx(est.net, est.gross * 0.5));
    }

    #[test]
    fn calibration_round_trip() {
        let mut store = MemoryStore::default();

        let first = PayEstimator::new(&mut store, rates())
            .estimate("80:00", Some(1000.0))
            .unwrap();
        assert!(approx(first.gross, 988.0));
        let m = first.actual_multiplier.unwrap();
        assert!(approx(m, 1000.0 / 988.0));
        assert_eq!(store.history(), &[m]);

        let second = PayEstimator::new(&mut store, rates())
            .estimate("80:00", None)
            .unwrap();
        assert_eq!(second.deduction, m);
        assert!(approx(second.net, 1000.0));
    }

    #[test]
    fn read_only_calls_never_write() {
        let mut store = MemoryStore::new(vec![0.8, 0.9]);
        let mut estimator = PayEstimator::new(&mut store, rates());

        let a = estimator.estimate("37.25", None).unwrap();
        let b = estimator.estimate("37.25", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.updated_history, vec![0.8, 0.9]);

        assert_eq!(store.saves, 0);
        assert_eq!(store.history(), &[0.8, 0.9]);
    }

    #[test]
    fn parse_error_leaves_history_untouched() {
        let mut store = MemoryStore::new(vec![0.8]);
        let res = PayEstimator::new(&mut store, rates()).estimate("abc", Some(900.0));
        assert!(matches!(res, Err(AppError::Parse(_))));
        assert_eq!(store.saves, 0);
        assert_eq!(store.history(), &[0.8]);
    }
}
