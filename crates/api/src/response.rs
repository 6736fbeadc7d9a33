//! Response bodies shared by the sync handlers.

use planetsync_core::sync::SyncStatistics;
use serde::Serialize;

/// Action label reported for a full sync.
pub const FULL_SYNC_ACTION: &str = "full_sync";

/// Body of a successful `POST /planets/sync`.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: &'static str,
    pub stats: SyncStatistics,
    pub action: &'static str,
}

impl SyncResponse {
    pub fn full_sync(stats: SyncStatistics) -> Self {
        Self {
            message: "Planet synchronization completed",
            stats,
            action: FULL_SYNC_ACTION,
        }
    }
}
