//! Route definitions for the `/planets` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{planets, sync};
use crate::state::AppState;

/// Routes mounted at `/planets`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// POST   /sync           -> sync::run
/// GET    /sync-status    -> sync::status
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(planets::list).post(planets::create))
        .route("/sync", post(sync::run))
        .route("/sync-status", get(sync::status))
        .route(
            "/{id}",
            get(planets::get_by_id)
                .put(planets::update)
                .delete(planets::delete),
        )
}
