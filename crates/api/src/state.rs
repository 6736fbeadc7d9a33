use std::sync::Arc;

use planetsync_db::store::PgPlanetStore;
use planetsync_graphql::StarWarsPlanets;
use planetsync_sync::PlanetSyncEngine;

use crate::config::ServerConfig;

/// The engine as wired in production.
pub type SyncEngine = PlanetSyncEngine<StarWarsPlanets, PgPlanetStore>;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone; the engine is shared so its last-run statistics and
/// run guard outlive individual requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: planetsync_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Planet synchronization engine.
    pub sync: Arc<SyncEngine>,
}
