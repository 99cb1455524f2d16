//! Integration tests for the estimator on the baseline site and its variants.

mod common;

use std::collections::HashMap;

use pv_savings::model::estimate;
use pv_savings::overrides::Overrides;
use pv_savings::report::{EstimateReport, NO_CAP_SENTINEL};

#[test]
fn baseline_is_under_demand_cap_with_plausible_yield() {
    let result = estimate(&common::baseline_config());
    let report = EstimateReport::from(&result);

    assert!(!report.demand_cap_applied);
    assert!(
        (700.0..=1100.0).contains(&report.specific_yield_kwh_per_kwp),
        "specific yield {} kWh/kWp outside UK range",
        report.specific_yield_kwh_per_kwp
    );
    assert_eq!(report.pv_annual_kwh, report.self_use_kwh);
    assert_eq!(report.annual_maintenance_cost, 72.0);
    assert_eq!(report.estimated_install_cost, 4200.0);
    assert!(report.net_annual_savings > 0.0);
}

#[test]
fn baseline_tilt_collects_more_than_horizontal() {
    let result = estimate(&common::baseline_config());
    assert!(result.solar.annual_poa_kwh_m2 > result.solar.annual_ghi_kwh_m2());
}

#[test]
fn panel_count_gives_exact_capacity() {
    let params: HashMap<String, String> = [("panelCount", "250"), ("panelWatt", "400")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let cfg = Overrides::from_query(&params).apply(&common::baseline_config());
    assert_eq!(cfg.array.capacity_kwp, 100.0);

    let result = estimate(&cfg);
    assert_eq!(result.inputs.array.capacity_kwp, 100.0);
    assert_eq!(result.savings.estimated_install_cost, 105_000.0);
}

#[test]
fn pure_diffuse_flat_month_equals_diffuse_total() {
    for month in 0..12 {
        let cfg = common::pure_diffuse_flat_config(month, 2.0);
        let result = estimate(&cfg);
        let detail = &result.solar.monthly[month];

        assert_eq!(detail.poa_monthly, detail.dhi_monthly, "month {month}");
        assert_eq!(result.solar.annual_poa_kwh_m2, detail.dhi_monthly);
    }
}

#[test]
fn demand_cap_below_generation_is_applied() {
    let mut cfg = common::baseline_config();
    cfg.tariff.annual_demand_kwh = Some(1000.0);
    let result = estimate(&cfg);

    assert!(result.savings.pv_annual_kwh > 1000.0);
    assert_eq!(result.savings.self_use_kwh, 1000.0);
    assert!(result.savings.demand_cap_applied);
    assert_eq!(
        result.savings.avoided_import_cost,
        1000.0 * cfg.tariff.import_rate_per_kwh
    );
}

#[test]
fn absent_demand_cap_is_unbounded() {
    let result = estimate(&common::uncapped_config());
    assert_eq!(result.savings.self_use_kwh, result.savings.pv_annual_kwh);
    assert!(!result.savings.demand_cap_applied);

    let json = serde_json::to_value(EstimateReport::from(&result)).ok();
    assert_eq!(
        json.as_ref()
            .and_then(|j| j["inputsUsed"]["annualElecDemandKWh"].as_str()),
        Some(NO_CAP_SENTINEL)
    );
}

#[test]
fn identical_configs_give_identical_reports() {
    let cfg = common::baseline_config();
    let a = serde_json::to_string(&EstimateReport::from(&estimate(&cfg))).ok();
    let b = serde_json::to_string(&EstimateReport::from(&estimate(&cfg))).ok();
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn tiny_array_can_lose_money() {
    let mut cfg = common::baseline_config();
    cfg.array.capacity_kwp = 0.5;
    cfg.tariff.import_rate_per_kwh = 0.01;
    let result = estimate(&cfg);
    assert!(result.savings.net_annual_savings < 0.0);
}

#[test]
fn average_sunset_angle_uses_all_months() {
    let result = estimate(&common::baseline_config());
    let mean: f64 = result
        .solar
        .monthly
        .iter()
        .map(|d| d.sunset_hour_angle_deg)
        .sum::<f64>()
        / 12.0;
    assert!((result.solar.avg_sunset_hour_angle_deg() - mean).abs() < 1e-9);
    // Equinox-ish average at any latitude sits near 90°.
    assert!((result.solar.avg_sunset_hour_angle_deg() - 90.0).abs() < 5.0);
}
