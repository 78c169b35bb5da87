pub mod estimator;
pub mod history;
pub mod hours;
pub mod log;
pub mod rates;
