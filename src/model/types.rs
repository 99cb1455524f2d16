//! Estimator output types: monthly diagnostics, transposition and savings.

use crate::config::EstimatorConfig;

/// Diagnostic record for one calendar month.
///
/// Irradiation totals are unrounded; `beam_fraction` and
/// `sunset_hour_angle_deg` are already rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySolarDetail {
    /// Month index (0 = January).
    pub month_index: usize,
    /// Short month label (`"Jan"` … `"Dec"`).
    pub month_label: &'static str,
    /// Daily-average global horizontal irradiance input (kWh/m²/day).
    pub ghi_daily: f64,
    /// Daily-average diffuse horizontal irradiance input (kWh/m²/day).
    pub dhi_daily: f64,
    /// Monthly global horizontal irradiation (kWh/m²).
    pub ghi_monthly: f64,
    /// Monthly diffuse horizontal irradiation (kWh/m²).
    pub dhi_monthly: f64,
    /// Monthly plane-of-array irradiation (kWh/m²).
    pub poa_monthly: f64,
    /// Beam share of global irradiation, 2 dp.
    pub beam_fraction: f64,
    /// Sunset hour angle on the representative day (degrees), 1 dp.
    pub sunset_hour_angle_deg: f64,
}

/// Result of transposing a year of horizontal irradiance onto the array.
#[derive(Debug, Clone, PartialEq)]
pub struct Transposition {
    /// Annual plane-of-array irradiation (kWh/m²/year).
    pub annual_poa_kwh_m2: f64,
    /// One record per calendar month, January first.
    pub monthly: Vec<MonthlySolarDetail>,
}

impl Transposition {
    /// Annual global horizontal irradiation (kWh/m²/year).
    pub fn annual_ghi_kwh_m2(&self) -> f64 {
        self.monthly.iter().fold(0.0, |acc, d| acc + d.ghi_monthly)
    }

    /// Annual diffuse horizontal irradiation (kWh/m²/year).
    pub fn annual_dhi_kwh_m2(&self) -> f64 {
        self.monthly.iter().fold(0.0, |acc, d| acc + d.dhi_monthly)
    }

    /// Mean of the monthly sunset hour angles (degrees). Display only.
    pub fn avg_sunset_hour_angle_deg(&self) -> f64 {
        if self.monthly.is_empty() {
            return 0.0;
        }
        let total = self
            .monthly
            .iter()
            .fold(0.0, |acc, d| acc + d.sunset_hour_angle_deg);
        total / self.monthly.len() as f64
    }
}

/// Annual energy and money figures under the no-export model.
///
/// Values are unrounded; rounding happens in [`crate::report`].
#[derive(Debug, Clone, PartialEq)]
pub struct Savings {
    /// Annual yield per installed kWp (kWh/kWp).
    pub specific_yield_kwh_per_kwp: f64,
    /// Annual PV generation (kWh).
    pub pv_annual_kwh: f64,
    /// Generation consumed on site, capped by demand (kWh).
    pub self_use_kwh: f64,
    /// Whether a finite demand cap cut self-consumption below generation.
    pub demand_cap_applied: bool,
    /// Grid import cost avoided.
    pub avoided_import_cost: f64,
    /// Yearly maintenance cost.
    pub annual_maintenance_cost: f64,
    /// Avoided import cost minus maintenance. May be negative.
    pub net_annual_savings: f64,
    /// Up-front installation cost. Informational only.
    pub estimated_install_cost: f64,
}

/// Everything one call to [`super::estimate`] produces.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateResult {
    /// Configuration the estimate was computed from.
    pub inputs: EstimatorConfig,
    /// Plane-of-array irradiance and monthly diagnostics.
    pub solar: Transposition,
    /// Energy and money figures.
    pub savings: Savings,
}
