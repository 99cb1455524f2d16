//! Solar yield and savings estimator.
//!
//! [`estimate`] is the only entry point the boundary layers need: it is pure,
//! total over any [`EstimatorConfig`], and keeps no state between calls.

/// Horizontal to plane-of-array transposition.
pub mod irradiance;
pub mod savings;
pub mod types;

pub use types::{EstimateResult, MonthlySolarDetail, Savings, Transposition};

use crate::config::EstimatorConfig;

/// Estimates annual PV yield and no-export savings for a site.
///
/// # Examples
///
/// ```
/// use pv_savings::config::EstimatorConfig;
/// use pv_savings::model::estimate;
///
/// let result = estimate(&EstimatorConfig::baseline());
/// assert_eq!(result.solar.monthly.len(), 12);
/// assert!(!result.savings.demand_cap_applied);
/// ```
pub fn estimate(config: &EstimatorConfig) -> EstimateResult {
    let site = &config.site;
    let solar = irradiance::transpose(
        site.latitude_deg,
        site.tilt_deg,
        site.albedo,
        &config.climate.ghi_daily,
        &config.climate.dhi_daily,
    );
    let savings = savings::aggregate(solar.annual_poa_kwh_m2, config);

    EstimateResult {
        inputs: config.clone(),
        solar,
        savings,
    }
}

/// Rounds `x` to `digits` decimal places, halves rounding up.
///
/// ```
/// use pv_savings::model::round_to;
///
/// assert_eq!(round_to(2.345, 1), 2.3);
/// assert_eq!(round_to(-0.5, 0), 0.0);
/// assert_eq!(round_to(1234.5, 0), 1235.0);
/// ```
pub fn round_to(x: f64, digits: i32) -> f64 {
    let p = 10_f64.powi(digits);
    (x * p + 0.5).floor() / p
}
