//! REST API for production plan requests.
//!
//! Provides two endpoints:
//! - `GET /` — service banner / liveness probe
//! - `POST /productionplan` — compute a merit-order production plan

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

/// Immutable application state shared across all request handlers.
///
/// Fixed at process start and wrapped in `Arc` — no locks needed since
/// planning itself is stateless and the flag is read-only.
pub struct AppState {
    /// Whether CO2 allowance cost is added to each unit's fuel cost.
    pub include_co2: bool,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/productionplan", post(handlers::production_plan))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Panics
///
/// Panics if the TCP listener cannot bind to `addr`.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind to {addr}: {e}"));
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .unwrap_or_else(|e| panic!("server error: {e}"));
}
