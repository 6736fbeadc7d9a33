pub mod health;
pub mod planets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /planets                 list, create
/// /planets/sync            run a full sync (POST)
/// /planets/sync-status     sync status (GET)
/// /planets/{id}            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/planets", planets::router())
}
