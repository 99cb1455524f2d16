/// CSV export of estimator diagnostics.
pub mod export;
