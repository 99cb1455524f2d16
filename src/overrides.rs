//! Per-request configuration overrides.
//!
//! Requests name a handful of fields to change; everything else comes from the
//! baseline. Overrides are merged into a fresh [`EstimatorConfig`], the
//! baseline itself is never touched.

use std::collections::HashMap;

use serde::Serialize;

use crate::config::EstimatorConfig;

/// Panel rating assumed when a panel count arrives without a usable wattage.
pub const PANEL_WATT_DEFAULT: f64 = 400.0;

/// Query parameter names accepted by the HTTP boundary.
pub const QUERY_KEYS: &[&str] = &[
    "arrayKWp",
    "panelCount",
    "panelWatt",
    "tiltDeg",
    "importRate",
    "demand",
    "maintenancePerKWp",
    "installPerKWp",
];

/// Optional replacements for a subset of configuration fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overrides {
    /// Array size (kWp). Ignored when `panel_count` is set.
    pub array_kwp: Option<f64>,
    /// Number of panels; with `panel_watt` it determines the array size.
    pub panel_count: Option<f64>,
    /// Rating of one panel (W).
    pub panel_watt: Option<f64>,
    /// Panel tilt (degrees).
    pub tilt_deg: Option<f64>,
    /// Import tariff per kWh.
    pub import_rate: Option<f64>,
    /// Annual demand cap (kWh). Non-finite removes the cap.
    pub demand: Option<f64>,
    /// Yearly maintenance cost per kWp.
    pub maintenance_per_kwp: Option<f64>,
    /// Installation cost per kWp.
    pub install_per_kwp: Option<f64>,
}

/// Parses an optional raw value, treating anything unusable as absent.
///
/// `NaN` counts as unusable; infinities are kept.
///
/// ```
/// use pv_savings::overrides::parse_number;
///
/// assert_eq!(parse_number(Some("20")), Some(20.0));
/// assert_eq!(parse_number(Some(" 1.5 ")), Some(1.5));
/// assert_eq!(parse_number(Some("abc")), None);
/// assert_eq!(parse_number(Some("NaN")), None);
/// assert_eq!(parse_number(None), None);
/// ```
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

impl Overrides {
    /// Builds overrides from query parameters, ignoring malformed numbers.
    ///
    /// Unknown keys are ignored too.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| parse_number(params.get(key).map(String::as_str));
        Self {
            array_kwp: get("arrayKWp"),
            panel_count: get("panelCount"),
            panel_watt: get("panelWatt"),
            tilt_deg: get("tiltDeg"),
            import_rate: get("importRate"),
            demand: get("demand"),
            maintenance_per_kwp: get("maintenancePerKWp"),
            install_per_kwp: get("installPerKWp"),
        }
    }

    /// True if no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Array size implied by these overrides, if any.
    ///
    /// A panel count takes priority over an explicit `array_kwp`.
    pub fn capacity_kwp(&self) -> Option<f64> {
        match self.panel_count {
            Some(count) => {
                let watt = self
                    .panel_watt
                    .filter(|w| *w > 0.0)
                    .unwrap_or(PANEL_WATT_DEFAULT);
                Some(count * watt / 1000.0)
            }
            None => self.array_kwp,
        }
    }

    /// Returns a copy of `base` with these overrides applied.
    pub fn apply(&self, base: &EstimatorConfig) -> EstimatorConfig {
        let mut cfg = base.clone();
        if let Some(kwp) = self.capacity_kwp() {
            cfg.array.capacity_kwp = kwp;
        }
        if let Some(tilt) = self.tilt_deg {
            cfg.site.tilt_deg = tilt;
        }
        if let Some(rate) = self.import_rate {
            cfg.tariff.import_rate_per_kwh = rate;
        }
        if let Some(demand) = self.demand {
            cfg.tariff.annual_demand_kwh = Some(demand).filter(|d| d.is_finite());
        }
        if let Some(m) = self.maintenance_per_kwp {
            cfg.costs.maintenance_per_kwp_year = m;
        }
        if let Some(i) = self.install_per_kwp {
            cfg.costs.install_per_kwp = i;
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_overrides_leave_baseline_unchanged() {
        let base = EstimatorConfig::baseline();
        let o = Overrides::from_query(&HashMap::new());
        assert!(o.is_empty());
        assert_eq!(o.apply(&base), base);
    }

    #[test]
    fn panel_count_sets_capacity_exactly() {
        let o = Overrides::from_query(&query(&[("panelCount", "250"), ("panelWatt", "400")]));
        let cfg = o.apply(&EstimatorConfig::baseline());
        assert_eq!(cfg.array.capacity_kwp, 100.0);
    }

    #[test]
    fn panel_count_beats_array_kwp() {
        let o = Overrides::from_query(&query(&[("arrayKWp", "7"), ("panelCount", "10")]));
        assert_eq!(o.capacity_kwp(), Some(4.0));
    }

    #[test]
    fn unusable_panel_watt_falls_back_to_default() {
        for watt in ["0", "-300", "lots"] {
            let o = Overrides::from_query(&query(&[("panelCount", "5"), ("panelWatt", watt)]));
            assert_eq!(o.capacity_kwp(), Some(2.0), "panelWatt={watt}");
        }
    }

    #[test]
    fn malformed_values_keep_baseline() {
        let base = EstimatorConfig::baseline();
        let o = Overrides::from_query(&query(&[
            ("tiltDeg", "steep"),
            ("importRate", ""),
            ("demand", "NaN"),
        ]));
        assert!(o.is_empty());
        assert_eq!(o.apply(&base), base);
    }

    #[test]
    fn blank_values_are_not_zero() {
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("   ")), None);

        let o = Overrides::from_query(&query(&[("demand", ""), ("importRate", " ")]));
        assert!(o.is_empty());
        assert_eq!(
            o.apply(&EstimatorConfig::baseline()).tariff.annual_demand_kwh,
            Some(424_000.0)
        );
    }

    #[test]
    fn overrides_replace_named_fields_only() {
        let base = EstimatorConfig::baseline();
        let o = Overrides::from_query(&query(&[
            ("tiltDeg", "20"),
            ("importRate", "0.24"),
            ("demand", "250000"),
            ("maintenancePerKWp", "12"),
            ("installPerKWp", "900"),
            ("colour", "blue"),
        ]));
        let cfg = o.apply(&base);
        assert_eq!(cfg.site.tilt_deg, 20.0);
        assert_eq!(cfg.tariff.import_rate_per_kwh, 0.24);
        assert_eq!(cfg.tariff.annual_demand_kwh, Some(250_000.0));
        assert_eq!(cfg.costs.maintenance_per_kwp_year, 12.0);
        assert_eq!(cfg.costs.install_per_kwp, 900.0);
        assert_eq!(cfg.site.latitude_deg, base.site.latitude_deg);
        assert_eq!(cfg.array, base.array);
        // base untouched
        assert_eq!(base, EstimatorConfig::baseline());
    }

    #[test]
    fn infinite_demand_removes_cap() {
        let o = Overrides::from_query(&query(&[("demand", "inf")]));
        let cfg = o.apply(&EstimatorConfig::baseline());
        assert_eq!(cfg.tariff.annual_demand_kwh, None);
    }
}
