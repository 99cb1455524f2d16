//! Shared test fixtures for integration tests.

use pv_savings::config::{EstimatorConfig, MonthlySeries};

/// Baseline configuration (53.4°N, 35° tilt, 4 kWp, demand cap 424 MWh).
pub fn baseline_config() -> EstimatorConfig {
    EstimatorConfig::baseline()
}

/// Baseline with the demand cap removed.
pub fn uncapped_config() -> EstimatorConfig {
    EstimatorConfig::uncapped()
}

/// Flat array, zero albedo, pure diffuse sky with irradiance only in `month`.
pub fn pure_diffuse_flat_config(month: usize, daily_kwh_m2: f64) -> EstimatorConfig {
    let mut series = MonthlySeries::uniform(0.0);
    series.0[month] = daily_kwh_m2;

    let mut cfg = EstimatorConfig::baseline();
    cfg.site.tilt_deg = 0.0;
    cfg.site.albedo = 0.0;
    cfg.climate.ghi_daily = series;
    cfg.climate.dhi_daily = series;
    cfg
}
