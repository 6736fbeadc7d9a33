use axum::extract::State;
use axum::{routing::get, Json, Router};
use planetsync_db::repositories::PlanetRepo;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Number of stored planets; `null` when the database is unreachable.
    pub planet_count: Option<i64>,
    /// GraphQL endpoint that sync runs fetch from.
    pub upstream_endpoint: String,
}

/// GET /health -- returns service and database health along with the
/// size of the local planet catalogue.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = planetsync_db::health_check(&state.pool).await.is_ok();

    let planet_count = if db_healthy {
        match PlanetRepo::count(&state.pool).await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to count planets for health check");
                None
            }
        }
    } else {
        None
    };

    let status = if planet_count.is_some() { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        planet_count,
        upstream_endpoint: state.config.graphql.endpoint.clone(),
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
