//! Illustrative site load profile.
//!
//! Shown alongside every estimate so a reader can compare generation against
//! what the site actually draws. The estimator never reads it.

use serde::{Deserialize, Serialize};

/// Annual consumption summary for the site being assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadProfile {
    /// Display name of the site operator.
    pub name: String,
    /// Total grid import over a year (kWh).
    pub annual_consumption_kwh: f64,
    /// Typical daily consumption (kWh).
    pub average_daily_kwh: f64,
    /// Highest half-hour demand seen on bills (kW).
    pub peak_demand_kw: f64,
    /// Working days per year.
    pub working_days_per_year: u32,
    /// Consumption per calendar month (kWh), January first.
    pub monthly_kwh: Vec<f64>,
}

impl Default for LoadProfile {
    fn default() -> Self {
        Self {
            name: "Network Rail".to_string(),
            annual_consumption_kwh: 424_000.0,
            average_daily_kwh: 1160.0,
            peak_demand_kw: 210.0,
            working_days_per_year: 260,
            monthly_kwh: vec![
                32_000.0, 31_000.0, 33_000.0, 35_000.0, 36_000.0, 38_000.0, 39_000.0, 40_000.0,
                37_000.0, 36_000.0, 34_000.0, 33_000.0,
            ],
        }
    }
}

impl LoadProfile {
    /// Sum of the monthly breakdown (kWh).
    pub fn monthly_total_kwh(&self) -> f64 {
        self.monthly_kwh.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_monthly_split_keeps_annual_total() {
        let p = LoadProfile::default();
        assert_eq!(p.monthly_total_kwh(), p.annual_consumption_kwh);
    }

    #[test]
    fn default_has_twelve_months() {
        let p = LoadProfile::default();
        assert_eq!(p.monthly_kwh.len(), 12);
        assert!(p.monthly_total_kwh() > 0.0);
    }
}
