//! Request handlers for the API endpoints.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use super::AppState;
use crate::model;
use crate::overrides::{Overrides, QUERY_KEYS};
use crate::report::EstimateReport;

/// Runs an estimate for the baseline merged with the query overrides.
///
/// `GET /estimate` → 200 + `EstimateReport` JSON
/// `GET /estimate?panelCount=250&panelWatt=400&tiltDeg=20` → overridden inputs
///
/// Malformed numbers are ignored and the baseline value is kept.
pub async fn estimate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<EstimateReport> {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("same-origin");
    let overrides = Overrides::from_query(&params);
    info!(?overrides, origin, "estimate");

    let config = overrides.apply(&state.baseline);
    let result = model::estimate(&config);
    Json(EstimateReport::from(&result))
}

/// `OPTIONS /estimate` → 204.
///
/// The CORS layer answers preflights itself with 200 and its headers; this
/// runs outside it and only rewrites the status.
pub async fn preflight_status(method: Method, mut response: Response) -> Response {
    if method == Method::OPTIONS {
        *response.status_mut() = StatusCode::NO_CONTENT;
    }
    response
}

/// Serves the dashboard page.
///
/// `GET /` → 200 + HTML, or 500 + plain text if the file cannot be read.
pub async fn frontend(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(&state.frontend_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            warn!(path = %state.frontend_path.display(), error = %e, "frontend missing");
            (StatusCode::INTERNAL_SERVER_ERROR, "Frontend missing.").into_response()
        }
    }
}

/// Plain-text usage for any unknown path.
pub async fn help() -> String {
    help_text()
}

fn help_text() -> String {
    format!(
        "Minimal PV annual savings (no export)\n\n\
         GET / -> dashboard hitting /estimate\n\
         GET /estimate -> JSON with pvAnnualKWh, selfUseKWh, and annualSavingsGBP.\n\
         Query overrides: {}\n\
         Example: /estimate?panelCount=250&panelWatt=400&tiltDeg=20&importRate=0.24&demand=250000\n",
        QUERY_KEYS.join(", ")
    )
}
