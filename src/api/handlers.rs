//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use super::AppState;
use super::types::plan_error_response;
use crate::plan::{self, PlanError, PlanRequest};

/// Service banner, doubles as a liveness probe.
///
/// `GET /` → 200 + `{"message": ...}`
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "merit-dispatch production plan API" }))
}

/// Computes a production plan for the posted load request.
///
/// `POST /productionplan` → 200 + `[{name, p}, ...]` JSON
/// Invalid units or missing fuel prices → 400 + `ErrorResponse`
/// Demand beyond fleet capacity → 422 + `ErrorResponse` with `remaining`
pub async fn production_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> impl IntoResponse {
    match plan::production_plan(&request, state.include_co2) {
        Ok(assignments) => {
            tracing::debug!(
                load = request.load,
                units = request.powerplants.len(),
                assigned = assignments.len(),
                "plan computed"
            );
            (StatusCode::OK, Json(assignments)).into_response()
        }
        Err(err) => {
            if let PlanError::UnmetDemand { remaining, .. } = &err {
                tracing::error!(remaining, "target load could not be reached");
            } else {
                tracing::debug!(error = %err, "plan request rejected");
            }
            plan_error_response(&err).into_response()
        }
    }
}
