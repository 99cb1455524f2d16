//! Output-boundary view of an estimate.
//!
//! Rounds the estimator's raw figures for display and names fields the way
//! API consumers expect them: energy to whole kWh, money to 2 dp, yield and
//! irradiance to 1 dp.

use std::fmt;

use serde::Serialize;

use crate::model::{EstimateResult, MonthlySolarDetail, round_to};
use crate::profile::LoadProfile;

/// Reported in place of a demand figure when no cap applies.
pub const NO_CAP_SENTINEL: &str = "assumed large (no cap)";

/// Full report for one estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    #[serde(rename = "inputsUsed")]
    pub inputs_used: InputsUsed,
    #[serde(rename = "pvAnnualKWh")]
    pub pv_annual_kwh: f64,
    #[serde(rename = "selfUseKWh")]
    pub self_use_kwh: f64,
    #[serde(rename = "avoidedImportGBP")]
    pub avoided_import_cost: f64,
    #[serde(rename = "annualMaintenanceGBP")]
    pub annual_maintenance_cost: f64,
    #[serde(rename = "annualSavingsGBP")]
    pub net_annual_savings: f64,
    #[serde(rename = "specificYield_kWhPerKWp")]
    pub specific_yield_kwh_per_kwp: f64,
    #[serde(rename = "H_POA_year_kWhm2")]
    pub annual_poa_kwh_m2: f64,
    #[serde(rename = "demandCapApplied")]
    pub demand_cap_applied: bool,
    #[serde(rename = "estimatedInstallCostGBP")]
    pub estimated_install_cost: f64,
    #[serde(rename = "costAssumptionsUsed")]
    pub cost_assumptions_used: CostAssumptions,
    #[serde(rename = "solarStory")]
    pub solar_story: SolarStory,
    #[serde(rename = "companyLoadProfile")]
    pub company_load_profile: LoadProfileReport,
}

/// Inputs the estimate actually used, after overrides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputsUsed {
    #[serde(rename = "arrayKWp")]
    pub array_kwp: f64,
    #[serde(rename = "tiltDeg")]
    pub tilt_deg: f64,
    #[serde(rename = "latDeg")]
    pub lat_deg: f64,
    #[serde(rename = "PR")]
    pub performance_ratio: f64,
    #[serde(rename = "importRateGBPperKWh")]
    pub import_rate_per_kwh: f64,
    #[serde(rename = "annualElecDemandKWh")]
    pub annual_demand_kwh: DemandReport,
    #[serde(rename = "maintenanceGBPperKWp")]
    pub maintenance_per_kwp: f64,
    #[serde(rename = "installGBPperKWp")]
    pub install_per_kwp: f64,
}

/// Demand cap as reported: a number, or the no-cap sentinel string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DemandReport {
    Capped(f64),
    Unbounded(&'static str),
}

impl From<Option<f64>> for DemandReport {
    fn from(demand: Option<f64>) -> Self {
        match demand {
            Some(kwh) => Self::Capped(kwh),
            None => Self::Unbounded(NO_CAP_SENTINEL),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostAssumptions {
    #[serde(rename = "maintenanceGBPperKWp")]
    pub maintenance_per_kwp: f64,
    #[serde(rename = "installGBPperKWp")]
    pub install_per_kwp: f64,
}

/// Solar geometry and irradiance diagnostics behind the headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarStory {
    #[serde(rename = "latitudeDeg")]
    pub latitude_deg: f64,
    #[serde(rename = "tiltDeg")]
    pub tilt_deg: f64,
    /// Always 0: arrays face due south.
    #[serde(rename = "azimuthDeg")]
    pub azimuth_deg: f64,
    #[serde(rename = "arrayKWp")]
    pub array_kwp: f64,
    #[serde(rename = "annualGHIkWhm2")]
    pub annual_ghi_kwh_m2: f64,
    #[serde(rename = "annualDHIkWhm2")]
    pub annual_dhi_kwh_m2: f64,
    #[serde(rename = "annualPOA_kWhm2")]
    pub annual_poa_kwh_m2: f64,
    #[serde(rename = "avgSunsetHourAngleDeg")]
    pub avg_sunset_hour_angle_deg: f64,
    pub monthly: Vec<MonthlyRecord>,
}

/// One month of [`SolarStory`], irradiation totals rounded to 1 dp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub month_index: usize,
    pub month_label: &'static str,
    pub ghi_daily: f64,
    pub dhi_daily: f64,
    pub ghi_monthly: f64,
    pub dhi_monthly: f64,
    pub poa_monthly: f64,
    pub beam_fraction: f64,
    pub sunset_hour_angle_deg: f64,
}

impl From<&MonthlySolarDetail> for MonthlyRecord {
    fn from(d: &MonthlySolarDetail) -> Self {
        Self {
            month_index: d.month_index,
            month_label: d.month_label,
            ghi_daily: d.ghi_daily,
            dhi_daily: d.dhi_daily,
            ghi_monthly: round_to(d.ghi_monthly, 1),
            dhi_monthly: round_to(d.dhi_monthly, 1),
            poa_monthly: round_to(d.poa_monthly, 1),
            beam_fraction: d.beam_fraction,
            sunset_hour_angle_deg: d.sunset_hour_angle_deg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadProfileReport {
    pub name: String,
    #[serde(rename = "annualConsumptionKWh")]
    pub annual_consumption_kwh: f64,
    #[serde(rename = "averageDailyKWh")]
    pub average_daily_kwh: f64,
    #[serde(rename = "peakDemandKW")]
    pub peak_demand_kw: f64,
    pub working_days_per_year: u32,
    #[serde(rename = "monthlyKWh")]
    pub monthly_kwh: Vec<f64>,
}

impl From<&LoadProfile> for LoadProfileReport {
    fn from(p: &LoadProfile) -> Self {
        Self {
            name: p.name.clone(),
            annual_consumption_kwh: p.annual_consumption_kwh,
            average_daily_kwh: p.average_daily_kwh,
            peak_demand_kw: p.peak_demand_kw,
            working_days_per_year: p.working_days_per_year,
            monthly_kwh: p.monthly_kwh.clone(),
        }
    }
}

impl From<&EstimateResult> for EstimateReport {
    fn from(r: &EstimateResult) -> Self {
        let cfg = &r.inputs;
        let s = &r.savings;
        let solar = &r.solar;

        Self {
            inputs_used: InputsUsed {
                array_kwp: cfg.array.capacity_kwp,
                tilt_deg: cfg.site.tilt_deg,
                lat_deg: cfg.site.latitude_deg,
                performance_ratio: cfg.array.performance_ratio,
                import_rate_per_kwh: cfg.tariff.import_rate_per_kwh,
                annual_demand_kwh: cfg.tariff.annual_demand_kwh.into(),
                maintenance_per_kwp: cfg.costs.maintenance_per_kwp_year,
                install_per_kwp: cfg.costs.install_per_kwp,
            },
            pv_annual_kwh: round_to(s.pv_annual_kwh, 0),
            self_use_kwh: round_to(s.self_use_kwh, 0),
            avoided_import_cost: round_to(s.avoided_import_cost, 2),
            annual_maintenance_cost: round_to(s.annual_maintenance_cost, 2),
            net_annual_savings: round_to(s.net_annual_savings, 2),
            specific_yield_kwh_per_kwp: round_to(s.specific_yield_kwh_per_kwp, 1),
            annual_poa_kwh_m2: round_to(solar.annual_poa_kwh_m2, 1),
            demand_cap_applied: s.demand_cap_applied,
            estimated_install_cost: round_to(s.estimated_install_cost, 2),
            cost_assumptions_used: CostAssumptions {
                maintenance_per_kwp: cfg.costs.maintenance_per_kwp_year,
                install_per_kwp: cfg.costs.install_per_kwp,
            },
            solar_story: SolarStory {
                latitude_deg: cfg.site.latitude_deg,
                tilt_deg: cfg.site.tilt_deg,
                azimuth_deg: 0.0,
                array_kwp: cfg.array.capacity_kwp,
                annual_ghi_kwh_m2: round_to(solar.annual_ghi_kwh_m2(), 1),
                annual_dhi_kwh_m2: round_to(solar.annual_dhi_kwh_m2(), 1),
                annual_poa_kwh_m2: round_to(solar.annual_poa_kwh_m2, 1),
                avg_sunset_hour_angle_deg: round_to(solar.avg_sunset_hour_angle_deg(), 1),
                monthly: solar.monthly.iter().map(MonthlyRecord::from).collect(),
            },
            company_load_profile: LoadProfileReport::from(&cfg.load_profile),
        }
    }
}

impl EstimateReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for EstimateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = &self.inputs_used;
        let story = &self.solar_story;

        writeln!(f, "--- PV Savings Estimate (no export) ---")?;
        writeln!(
            f,
            "Array:                 {:.2} kWp, tilt {:.1}°, latitude {:.1}°, PR {:.2}",
            inputs.array_kwp, inputs.tilt_deg, inputs.lat_deg, inputs.performance_ratio
        )?;
        match &inputs.annual_demand_kwh {
            DemandReport::Capped(kwh) => writeln!(f, "Demand cap:            {kwh:.0} kWh")?,
            DemandReport::Unbounded(s) => writeln!(f, "Demand cap:            {s}")?,
        }
        writeln!(
            f,
            "Horizontal irradiance: {:.1} kWh/m² (diffuse {:.1})",
            story.annual_ghi_kwh_m2, story.annual_dhi_kwh_m2
        )?;
        writeln!(f, "Plane-of-array:        {:.1} kWh/m²", self.annual_poa_kwh_m2)?;
        writeln!(
            f,
            "Specific yield:        {:.1} kWh/kWp",
            self.specific_yield_kwh_per_kwp
        )?;
        writeln!(f, "PV generation:         {:.0} kWh", self.pv_annual_kwh)?;
        writeln!(
            f,
            "Self-consumed:         {:.0} kWh{}",
            self.self_use_kwh,
            if self.demand_cap_applied {
                " (capped by demand)"
            } else {
                ""
            }
        )?;
        writeln!(f, "Avoided import:        {:.2}", self.avoided_import_cost)?;
        writeln!(f, "Maintenance:           {:.2}", self.annual_maintenance_cost)?;
        writeln!(f, "Net annual savings:    {:.2}", self.net_annual_savings)?;
        writeln!(f, "Estimated install:     {:.2}", self.estimated_install_cost)?;
        writeln!(f)?;
        writeln!(f, "Month   GHI    DHI    POA  beam  sunset°")?;
        for m in &story.monthly {
            writeln!(
                f,
                "{:<5} {:>5.1}  {:>5.1}  {:>5.1}  {:>4.2}  {:>6.1}",
                m.month_label,
                m.ghi_monthly,
                m.dhi_monthly,
                m.poa_monthly,
                m.beam_fraction,
                m.sunset_hour_angle_deg
            )?;
        }
        write!(
            f,
            "Average sunset hour angle: {:.1}°",
            story.avg_sunset_hour_angle_deg
        )
    }
}
