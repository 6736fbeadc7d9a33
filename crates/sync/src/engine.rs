//! Sync orchestration: fetch, fill, reconcile, report.
//!
//! A run is fail-fast on the upstream fetch and on opening or committing the
//! reconciliation scope. Everything in between is per item: a planet that
//! cannot be mapped or persisted is counted as an error and the batch goes on.

use std::sync::RwLock;

use planetsync_core::generator;
use planetsync_core::planet::{display_name, to_planet_upsert, RawPlanetItem, RecordError};
use planetsync_core::sync::{
    PlanetSource, PlanetStore, ReconcileScope, SyncStatistics, SyncStatus, UpsertOutcome,
    UpsertResult,
};
use tokio::sync::Mutex;

use crate::error::SyncError;

/// Statistics of the last successful run, zero until one completes.
#[derive(Debug, Default)]
struct SyncStatusCache {
    last_stats: RwLock<SyncStatistics>,
}

impl SyncStatusCache {
    fn get(&self) -> SyncStatistics {
        *self
            .last_stats
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set(&self, stats: SyncStatistics) {
        *self
            .last_stats
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = stats;
    }
}

/// Synchronizes planets from a [`PlanetSource`] into a [`PlanetStore`].
///
/// Share one engine (behind an `Arc`) between callers so the last-run
/// statistics and the single-flight guard are shared too.
pub struct PlanetSyncEngine<S, P> {
    source: S,
    store: P,
    cache: SyncStatusCache,
    run_lock: Mutex<()>,
}

impl<S, P> PlanetSyncEngine<S, P>
where
    S: PlanetSource,
    P: PlanetStore,
{
    pub fn new(source: S, store: P) -> Self {
        Self {
            source,
            store,
            cache: SyncStatusCache::default(),
            run_lock: Mutex::new(()),
        }
    }

    /// Statistics of the last completed run.
    pub fn last_stats(&self) -> SyncStatistics {
        self.cache.get()
    }

    /// Run one full synchronization and return its statistics.
    ///
    /// Fails with [`SyncError::AlreadyRunning`] if another run holds the
    /// guard. On any error the cached statistics are left as they were and
    /// no planet writes become visible.
    pub async fn sync(&self) -> Result<SyncStatistics, SyncError> {
        let _guard = self.run_lock.try_lock().map_err(|_| {
            tracing::warn!("Planet sync requested while another run is in progress");
            SyncError::AlreadyRunning
        })?;

        tracing::info!("Starting planet synchronization");

        let planets = self.source.fetch_planets().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to fetch planets, aborting sync");
        })?;

        if planets.is_empty() {
            tracing::warn!("No planets received from GraphQL API");
        } else {
            tracing::info!(count = planets.len(), "Processing planets");
        }

        let mut scope = self.store.begin().await?;
        let mut stats = SyncStatistics::default();

        for raw in &planets {
            let name = display_name(raw);
            match reconcile_item(&mut scope, name, raw).await {
                Ok(result) => {
                    stats.record(result.outcome);
                    match result.outcome {
                        UpsertOutcome::Created => {
                            tracing::info!(
                                planet = name,
                                planet_id = result.planet_id,
                                "Created planet"
                            );
                        }
                        UpsertOutcome::Updated => {
                            tracing::info!(
                                planet = name,
                                planet_id = result.planet_id,
                                "Updated planet"
                            );
                        }
                    }
                }
                Err(e) => {
                    stats.record_error();
                    tracing::warn!(planet = name, error = %e, "Error processing planet");
                }
            }
        }

        scope.commit().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to commit planet sync");
        })?;

        self.cache.set(stats);
        tracing::info!(
            created = stats.created,
            updated = stats.updated,
            errors = stats.errors,
            total_processed = stats.total_processed,
            "Planet synchronization completed",
        );

        Ok(stats)
    }

    /// Current store totals plus the last run's statistics.
    pub async fn status(&self) -> Result<SyncStatus, SyncError> {
        let total = self.store.count().await?;
        let latest = self.store.latest_updated().await?;
        Ok(SyncStatus::new(total, latest, self.cache.get()))
    }
}

/// Fill, map and upsert one upstream item.
async fn reconcile_item<C: ReconcileScope>(
    scope: &mut C,
    name: &str,
    raw: &RawPlanetItem,
) -> Result<UpsertResult, RecordError> {
    let filled = generator::fill_missing(name, raw);
    let upsert = to_planet_upsert(&filled)?;
    scope
        .upsert_by_external_id(upsert.external_id.as_deref(), &upsert.fields)
        .await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
