//! Annual energy and money figures from plane-of-array irradiance.

use crate::config::EstimatorConfig;

use super::types::Savings;

/// Effective self-consumption cap (kWh), or `None` when unbounded.
///
/// Non-finite demand means no cap; a negative demand is treated as zero.
pub fn demand_cap_kwh(annual_demand_kwh: Option<f64>) -> Option<f64> {
    annual_demand_kwh
        .filter(|d| d.is_finite())
        .map(|d| d.max(0.0))
}

/// Computes the no-export savings for an annual plane-of-array irradiation.
///
/// Nothing is rounded here and no input is rejected: zero or negative values
/// flow straight through to a possibly non-physical result.
///
/// # Arguments
///
/// * `annual_poa_kwh_m2` - Annual plane-of-array irradiation (kWh/m²/year)
/// * `config` - Capacity, tariff, demand and cost fields are read from here
pub fn aggregate(annual_poa_kwh_m2: f64, config: &EstimatorConfig) -> Savings {
    let capacity_kwp = config.array.capacity_kwp;

    let specific_yield_kwh_per_kwp = annual_poa_kwh_m2 * config.array.performance_ratio;
    let pv_annual_kwh = specific_yield_kwh_per_kwp * capacity_kwp;

    let cap = demand_cap_kwh(config.tariff.annual_demand_kwh);
    let self_use_kwh = cap.map_or(pv_annual_kwh, |c| pv_annual_kwh.min(c));
    let demand_cap_applied = cap.is_some_and(|c| pv_annual_kwh > c);

    let avoided_import_cost = self_use_kwh * config.tariff.import_rate_per_kwh;
    let annual_maintenance_cost = capacity_kwp * config.costs.maintenance_per_kwp_year;
    let net_annual_savings = avoided_import_cost - annual_maintenance_cost;
    let estimated_install_cost = capacity_kwp * config.costs.install_per_kwp;

    Savings {
        specific_yield_kwh_per_kwp,
        pv_annual_kwh,
        self_use_kwh,
        demand_cap_applied,
        avoided_import_cost,
        annual_maintenance_cost,
        net_annual_savings,
        estimated_install_cost,
    }
}
