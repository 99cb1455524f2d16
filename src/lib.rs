//! Annual PV electricity savings estimator for sites that do not export.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Irradiance transposition and savings aggregation.
pub mod model;
pub mod overrides;
pub mod profile;
pub mod report;
pub mod telemetry;
