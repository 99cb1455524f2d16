//! Monthly horizontal irradiance to plane-of-array irradiance.
//!
//! Isotropic-sky transposition for a south-facing plane: the beam component is
//! scaled by the Liu–Jordan daily geometric factor `Rb`, the diffuse component
//! by the sky view factor `(1 + cos β) / 2`, and a ground-reflected term by
//! `albedo · (1 − cos β) / 2`. Each month is evaluated on its representative
//! mid-month day.

use crate::config::{MONTHS, MonthlySeries};

use super::round_to;
use super::types::{MonthlySolarDetail, Transposition};

/// Days in each calendar month (non-leap year).
pub const DAYS_IN_MONTH: [u32; MONTHS] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Representative day of year for each month.
pub const MID_MONTH_DAY_OF_YEAR: [u32; MONTHS] =
    [15, 46, 74, 105, 135, 166, 196, 227, 258, 288, 319, 349];

/// Short month labels used in diagnostics.
pub const MONTH_LABELS: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Solar declination (radians) for a day of the year (Cooper's equation).
pub fn declination(day_of_year: u32) -> f64 {
    23.45_f64.to_radians() * (360.0 * (284.0 + f64::from(day_of_year)) / 365.0).to_radians().sin()
}

/// Sunset hour angle (radians) for latitude `phi` and declination `delta`.
///
/// The `acos` argument is clamped to [-1, 1]: polar night gives 0 and
/// midnight sun gives π.
pub fn sunset_hour_angle(phi: f64, delta: f64) -> f64 {
    (-phi.tan() * delta.tan()).clamp(-1.0, 1.0).acos()
}

/// Liu–Jordan ratio of daily beam irradiation on a south-facing tilted plane
/// to that on the horizontal.
///
/// Returns 0 when the horizontal denominator vanishes (no daylight).
pub fn beam_tilt_factor(phi: f64, beta: f64, delta: f64, omega_s: f64) -> f64 {
    let numerator = (phi - beta).cos() * delta.cos() * omega_s.sin()
        + omega_s * (phi - beta).sin() * delta.sin();
    let denominator =
        phi.cos() * delta.cos() * omega_s.sin() + omega_s * phi.sin() * delta.sin();
    if denominator != 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Transposes one calendar month.
///
/// # Arguments
///
/// * `m` - Month index (0 = January)
/// * `phi` - Latitude (radians)
/// * `beta` - Tilt (radians)
/// * `albedo` - Ground reflectivity
/// * `ghi_daily` / `dhi_daily` - Daily-average irradiance for the month (kWh/m²/day)
///
/// # Panics
///
/// Panics if `m >= 12`.
pub fn transpose_month(
    m: usize,
    phi: f64,
    beta: f64,
    albedo: f64,
    ghi_daily: f64,
    dhi_daily: f64,
) -> MonthlySolarDetail {
    let days = f64::from(DAYS_IN_MONTH[m]);
    let h = ghi_daily * days;
    let h_d = dhi_daily * days;
    // Not clamped: DHI > GHI yields a negative beam term.
    let h_b = h - h_d;

    let delta = declination(MID_MONTH_DAY_OF_YEAR[m]);
    let omega_s = sunset_hour_angle(phi, delta);
    let rb = beam_tilt_factor(phi, beta, delta, omega_s);

    let h_tilt = h_b * rb + h_d * (1.0 + beta.cos()) / 2.0 + h * albedo * (1.0 - beta.cos()) / 2.0;

    let beam_fraction = if h > 0.0 {
        round_to((h - h_d).max(0.0) / h, 2)
    } else {
        0.0
    };

    MonthlySolarDetail {
        month_index: m,
        month_label: MONTH_LABELS[m],
        ghi_daily,
        dhi_daily,
        ghi_monthly: h,
        dhi_monthly: h_d,
        poa_monthly: h_tilt,
        beam_fraction,
        sunset_hour_angle_deg: round_to(omega_s.to_degrees(), 1),
    }
}

/// Transposes all twelve months and totals plane-of-array irradiation.
///
/// Months are independent; the order only fixes the order of the diagnostics.
///
/// # Returns
///
/// Annual plane-of-array irradiation (kWh/m²/year) and the monthly breakdown.
pub fn transpose(
    latitude_deg: f64,
    tilt_deg: f64,
    albedo: f64,
    ghi_daily: &MonthlySeries,
    dhi_daily: &MonthlySeries,
) -> Transposition {
    let phi = latitude_deg.to_radians();
    let beta = tilt_deg.to_radians();

    let monthly: Vec<MonthlySolarDetail> = (0..MONTHS)
        .map(|m| transpose_month(m, phi, beta, albedo, ghi_daily.get(m), dhi_daily.get(m)))
        .collect();
    let annual_poa_kwh_m2 = monthly.iter().fold(0.0, |acc, d| acc + d.poa_monthly);

    Transposition {
        annual_poa_kwh_m2,
        monthly,
    }
}
