//! TOML-based estimator configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::profile::LoadProfile;

/// Number of calendar months in every monthly series.
pub const MONTHS: usize = 12;

/// Top-level estimator configuration parsed from TOML.
///
/// All sections default to the baseline site. Load from TOML with
/// [`EstimatorConfig::from_toml_file`] or use [`EstimatorConfig::baseline`]
/// for the built-in default. A value is never mutated in place by the
/// estimator; per-request changes go through [`crate::overrides::Overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimatorConfig {
    /// Site location and array geometry.
    #[serde(default)]
    pub site: SiteConfig,
    /// Array size and losses.
    #[serde(default)]
    pub array: ArrayConfig,
    /// Import tariff and demand cap.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Linear cost coefficients.
    #[serde(default)]
    pub costs: CostConfig,
    /// Monthly irradiance tables.
    #[serde(default)]
    pub climate: ClimateConfig,
    /// Illustrative load profile echoed in reports.
    #[serde(default)]
    pub load_profile: LoadProfile,
}

/// Site location and array geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site latitude in degrees (positive = northern hemisphere).
    pub latitude_deg: f64,
    /// Panel tilt from horizontal in degrees. Panels face due south.
    pub tilt_deg: f64,
    /// Ground reflectivity (0.0–1.0).
    pub albedo: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            latitude_deg: 53.4,
            tilt_deg: 35.0,
            albedo: 0.20,
        }
    }
}

/// Array size and losses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Rated array size (kWp).
    pub capacity_kwp: f64,
    /// Fraction of theoretical yield actually delivered (0.0–1.0].
    pub performance_ratio: f64,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            capacity_kwp: 4.0,
            performance_ratio: 0.86,
        }
    }
}

/// Import tariff and annual demand cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Cost of one kWh of grid import avoided.
    pub import_rate_per_kwh: f64,
    /// Annual site demand (kWh) capping self-consumption. `None` means no cap.
    ///
    /// TOML has no null, so `inf` is accepted and read as "no cap".
    #[serde(deserialize_with = "deserialize_demand_cap")]
    pub annual_demand_kwh: Option<f64>,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            import_rate_per_kwh: 0.28,
            annual_demand_kwh: Some(424_000.0),
        }
    }
}

fn deserialize_demand_cap<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|v| v.is_finite()))
}

/// Linear cost coefficients per installed kWp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    /// Yearly maintenance cost per kWp.
    pub maintenance_per_kwp_year: f64,
    /// Turnkey installation cost per kWp.
    pub install_per_kwp: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            maintenance_per_kwp_year: 18.0,
            install_per_kwp: 1050.0,
        }
    }
}

/// Monthly daily-average irradiance tables (kWh/m²/day), January first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimateConfig {
    /// Global horizontal irradiance.
    pub ghi_daily: MonthlySeries,
    /// Diffuse horizontal irradiance. Expected to stay at or below GHI.
    pub dhi_daily: MonthlySeries,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            ghi_daily: MonthlySeries([0.8, 1.5, 2.6, 3.6, 4.6, 4.9, 4.8, 4.3, 3.1, 2.1, 1.0, 0.7]),
            dhi_daily: MonthlySeries([0.6, 0.9, 1.2, 1.5, 1.6, 1.6, 1.6, 1.4, 1.2, 0.9, 0.6, 0.5]),
        }
    }
}

/// Exactly twelve monthly values in calendar order.
///
/// Length is checked when the series is built, so the estimator itself never
/// sees a short or long table.
///
/// # Examples
///
/// ```
/// use pv_savings::config::MonthlySeries;
///
/// let series = MonthlySeries::try_from(vec![1.0; 12]).unwrap();
/// assert_eq!(series.get(11), 1.0);
/// assert!(MonthlySeries::try_from(vec![1.0; 11]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct MonthlySeries(pub [f64; MONTHS]);

impl MonthlySeries {
    /// Same value for every month.
    pub fn uniform(value: f64) -> Self {
        Self([value; MONTHS])
    }

    /// Value for month index `m` (0 = January).
    ///
    /// # Panics
    ///
    /// Panics if `m >= 12`.
    pub fn get(&self, m: usize) -> f64 {
        self.0[m]
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

/// A monthly table whose length is not twelve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {MONTHS} monthly values, got {0}")]
pub struct MonthlySeriesError(pub usize);

impl TryFrom<Vec<f64>> for MonthlySeries {
    type Error = MonthlySeriesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let len = values.len();
        <[f64; MONTHS]>::try_from(values)
            .map(Self)
            .map_err(|_| MonthlySeriesError(len))
    }
}

impl From<MonthlySeries> for Vec<f64> {
    fn from(series: MonthlySeries) -> Self {
        series.0.to_vec()
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"climate.ghi_daily"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

/// A physically questionable input.
///
/// Never fatal: the estimator still produces a number for it. The binary logs
/// these as warnings.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ConfigIssue {
    /// Dotted field path.
    pub field: String,
    /// What looks wrong with the value.
    pub message: String,
}

impl ConfigIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

impl EstimatorConfig {
    /// Returns the baseline site: a 4 kWp roof array near Manchester.
    pub fn baseline() -> Self {
        Self {
            site: SiteConfig::default(),
            array: ArrayConfig::default(),
            tariff: TariffConfig::default(),
            costs: CostConfig::default(),
            climate: ClimateConfig::default(),
            load_profile: LoadProfile::default(),
        }
    }

    /// Returns the commercial preset: 250 × 400 W panels on a shallow roof.
    pub fn commercial() -> Self {
        Self {
            site: SiteConfig {
                tilt_deg: 20.0,
                ..SiteConfig::default()
            },
            array: ArrayConfig {
                capacity_kwp: 100.0,
                ..ArrayConfig::default()
            },
            tariff: TariffConfig {
                import_rate_per_kwh: 0.24,
                annual_demand_kwh: Some(250_000.0),
            },
            ..Self::baseline()
        }
    }

    /// Returns the baseline site with no demand cap on self-consumption.
    pub fn uncapped() -> Self {
        Self {
            tariff: TariffConfig {
                annual_demand_kwh: None,
                ..TariffConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "commercial", "uncapped"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "commercial" => Ok(Self::commercial()),
            "uncapped" => Ok(Self::uncapped()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, contains unknown
    /// fields, or a monthly table does not hold exactly twelve values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Lists physically questionable values.
    ///
    /// Returns an empty vector when everything looks plausible. None of these
    /// stop an estimate from running.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let site = &self.site;
        if !(0.0..=90.0).contains(&site.tilt_deg) {
            issues.push(ConfigIssue::new("site.tilt_deg", "outside [0, 90] degrees"));
        }
        if !(-90.0..=90.0).contains(&site.latitude_deg) {
            issues.push(ConfigIssue::new(
                "site.latitude_deg",
                "outside [-90, 90] degrees",
            ));
        }
        if !(0.0..=1.0).contains(&site.albedo) {
            issues.push(ConfigIssue::new("site.albedo", "outside [0.0, 1.0]"));
        }

        let array = &self.array;
        if array.capacity_kwp <= 0.0 {
            issues.push(ConfigIssue::new("array.capacity_kwp", "should be > 0"));
        }
        if !(array.performance_ratio > 0.0 && array.performance_ratio <= 1.0) {
            issues.push(ConfigIssue::new(
                "array.performance_ratio",
                "outside (0.0, 1.0]",
            ));
        }

        if self.tariff.import_rate_per_kwh < 0.0 {
            issues.push(ConfigIssue::new("tariff.import_rate_per_kwh", "negative"));
        }
        if self.tariff.annual_demand_kwh.is_some_and(|d| d < 0.0) {
            issues.push(ConfigIssue::new(
                "tariff.annual_demand_kwh",
                "negative, treated as 0",
            ));
        }
        if self.costs.maintenance_per_kwp_year < 0.0 {
            issues.push(ConfigIssue::new(
                "costs.maintenance_per_kwp_year",
                "negative",
            ));
        }
        if self.costs.install_per_kwp < 0.0 {
            issues.push(ConfigIssue::new("costs.install_per_kwp", "negative"));
        }

        let climate = &self.climate;
        for (m, (ghi, dhi)) in climate.ghi_daily.iter().zip(climate.dhi_daily.iter()).enumerate() {
            if dhi > ghi {
                issues.push(ConfigIssue::new(
                    format!("climate.dhi_daily[{m}]"),
                    format!("{dhi} exceeds GHI {ghi}; beam term goes negative"),
                ));
            }
        }

        let profile = &self.load_profile;
        let monthly_total = profile.monthly_total_kwh();
        if (monthly_total - profile.annual_consumption_kwh).abs() > 1.0 {
            issues.push(ConfigIssue::new(
                "load_profile.monthly_kwh",
                format!(
                    "sums to {monthly_total} kWh but annual consumption is {} kWh",
                    profile.annual_consumption_kwh
                ),
            ));
        }

        issues
    }
}
