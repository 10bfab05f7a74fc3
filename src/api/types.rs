//! API error body and status mapping for planning failures.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::plan::PlanError;

/// Error response body for failed plan requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Unmet load remainder in MWh, present only for capacity shortfalls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
}

/// Maps a planning failure to its HTTP representation.
///
/// Malformed domain input (bad unit, missing fuel price) is the client's
/// mistake: 400. A fleet that cannot reach the target is a well-formed
/// request the planner cannot satisfy: 422, with the shortfall included
/// so the caller can report it. Neither leaks internals.
pub fn plan_error_response(err: &PlanError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        PlanError::InvalidUnit { .. } | PlanError::MissingFuelPrice { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
                remaining: None,
            }),
        ),
        PlanError::UnmetDemand { remaining, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "target load exceeds total fleet capacity".to_string(),
                remaining: Some(*remaining),
            }),
        ),
    }
}
