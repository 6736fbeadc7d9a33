//! Contracts between the sync engine and its collaborators.
//!
//! - [`PlanetSource`] fetches the upstream batch (fail-fast on [`FetchError`]).
//! - [`PlanetStore`] opens a [`ReconcileScope`], the unit of durability for
//!   one run, and answers the read-only status queries.
//! - [`SyncStatistics`] is the per-run outcome, returned by value.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::planet::{PlanetFields, RawPlanetItem, RecordError};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to obtain the upstream batch. Aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Network, DNS, TLS, timeout, or a non-2xx HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The source answered but reported errors or an unreadable payload.
    #[error("GraphQL errors: {}", .0.join("; "))]
    Protocol(Vec<String>),
}

/// Failure of the record store outside a single item (begin, commit, reads).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Record store error: {0}")]
pub struct StoreError(pub String);

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Result of reconciling one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// What an upsert wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertResult {
    pub planet_id: DbId,
    pub outcome: UpsertOutcome,
}

/// Aggregate counters for one sync run.
///
/// `total_processed` counts successfully reconciled items only, so
/// `created + updated == total_processed` and
/// `total_processed + errors` is the batch size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatistics {
    pub created: u64,
    pub updated: u64,
    pub errors: u64,
    pub total_processed: u64,
}

impl SyncStatistics {
    /// Count a successfully reconciled item.
    pub fn record(&mut self, outcome: UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created => self.created += 1,
            UpsertOutcome::Updated => self.updated += 1,
        }
        self.total_processed += 1;
    }

    /// Count an item that failed to map or persist.
    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    /// Number of items the run attempted.
    pub fn attempted(&self) -> u64 {
        self.total_processed + self.errors
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// The most recently written planet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestPlanet {
    pub name: String,
    pub updated_at: Timestamp,
}

/// Snapshot reported by the status query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    pub total_planets_in_db: i64,
    pub last_updated_planet: Option<String>,
    pub last_sync_time: Option<Timestamp>,
    pub last_sync_stats: SyncStatistics,
}

impl SyncStatus {
    pub fn new(total: i64, latest: Option<LatestPlanet>, last_stats: SyncStatistics) -> Self {
        let (last_updated_planet, last_sync_time) = match latest {
            Some(planet) => (Some(planet.name), Some(planet.updated_at)),
            None => (None, None),
        };
        Self {
            total_planets_in_db: total,
            last_updated_planet,
            last_sync_time,
            last_sync_stats: last_stats,
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Upstream provider of planet items.
#[async_trait]
pub trait PlanetSource: Send + Sync {
    /// Fetch the full planet list in a single request. No retries.
    async fn fetch_planets(&self) -> Result<Vec<RawPlanetItem>, FetchError>;
}

/// Persistent planet storage keyed by external id.
#[async_trait]
pub trait PlanetStore: Send + Sync {
    type Scope: ReconcileScope;

    /// Open a reconciliation scope. Writes made through it become visible
    /// only after [`ReconcileScope::commit`]; dropping it discards them.
    async fn begin(&self) -> Result<Self::Scope, StoreError>;

    /// Number of persisted planets.
    async fn count(&self) -> Result<i64, StoreError>;

    /// The planet with the most recent `updated_at`, if any.
    async fn latest_updated(&self) -> Result<Option<LatestPlanet>, StoreError>;
}

/// One run's worth of writes.
#[async_trait]
pub trait ReconcileScope: Send {
    /// Insert a planet, or overwrite the row already holding `external_id`.
    ///
    /// A `None` external id always inserts. A failed upsert must leave the
    /// scope usable for the next item.
    async fn upsert_by_external_id(
        &mut self,
        external_id: Option<&str>,
        fields: &PlanetFields,
    ) -> Result<UpsertResult, RecordError>;

    /// Make every successful upsert durable.
    async fn commit(self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_start_at_zero() {
        let stats = SyncStatistics::default();
        assert_eq!(stats.created, 0);
        assert_eq!(stats.updated, 0);
        assert_eq!(stats.errors, 0);
        assert_eq!(stats.total_processed, 0);
    }

    #[test]
    fn record_counts_outcomes_and_processed() {
        let mut stats = SyncStatistics::default();
        stats.record(UpsertOutcome::Created);
        stats.record(UpsertOutcome::Created);
        stats.record(UpsertOutcome::Updated);
        stats.record_error();

        assert_eq!(stats.created, 2);
        assert_eq!(stats.updated, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total_processed, 3);
        assert_eq!(stats.attempted(), 4);
    }

    #[test]
    fn statistics_serialize_with_snake_case_keys() {
        let stats = SyncStatistics {
            created: 1,
            updated: 2,
            errors: 0,
            total_processed: 3,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"created": 1, "updated": 2, "errors": 0, "total_processed": 3})
        );
    }

    #[test]
    fn protocol_error_joins_messages() {
        let err = FetchError::Protocol(vec!["first".into(), "second".into()]);
        assert_eq!(err.to_string(), "GraphQL errors: first; second");
    }

    #[test]
    fn status_without_latest_planet_has_null_fields() {
        let status = SyncStatus::new(0, None, SyncStatistics::default());
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["total_planets_in_db"], 0);
        assert!(json["last_updated_planet"].is_null());
        assert!(json["last_sync_time"].is_null());
        assert_eq!(json["last_sync_stats"]["created"], 0);
    }

    #[test]
    fn status_carries_latest_planet() {
        let updated_at = chrono::Utc::now();
        let latest = LatestPlanet {
            name: "Hoth".into(),
            updated_at,
        };
        let status = SyncStatus::new(3, Some(latest), SyncStatistics::default());

        assert_eq!(status.total_planets_in_db, 3);
        assert_eq!(status.last_updated_planet.as_deref(), Some("Hoth"));
        assert_eq!(status.last_sync_time, Some(updated_at));
    }
}
