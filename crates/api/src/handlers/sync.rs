//! Handlers for planet synchronization.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use planetsync_core::sync::SyncStatus;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::SyncResponse;
use crate::state::AppState;

/// Optional body of `POST /planets/sync`.
#[derive(Debug, Default, Deserialize)]
struct SyncRequest {
    #[serde(default)]
    planet_id: Option<serde_json::Value>,
}

fn parse_sync_request(body: &Bytes) -> AppResult<SyncRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SyncRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid sync request body: {e}")))
}

/// POST /api/v1/planets/sync
///
/// Runs a full synchronization. Syncing a single planet is not supported,
/// so a non-null `planet_id` is rejected.
pub async fn run(State(state): State<AppState>, body: Bytes) -> AppResult<Json<SyncResponse>> {
    let request = parse_sync_request(&body)?;
    if request.planet_id.is_some_and(|id| !id.is_null()) {
        return Err(AppError::BadRequest(
            "Single-planet sync is not supported; omit planet_id to run a full sync".into(),
        ));
    }

    let stats = state.sync.sync().await?;
    Ok(Json(SyncResponse::full_sync(stats)))
}

/// GET /api/v1/planets/sync-status
pub async fn status(State(state): State<AppState>) -> AppResult<Json<SyncStatus>> {
    let status = state.sync.status().await.map_err(AppError::SyncStatus)?;
    Ok(Json(status))
}
