//! Postgres implementation of the sync engine's record store.
//!
//! A reconciliation scope is one transaction. Each upsert runs inside its
//! own savepoint so a rejected row is rolled back on its own and the
//! surrounding transaction stays usable for the rest of the batch.

use async_trait::async_trait;
use planetsync_core::planet::{PlanetFields, RecordError};
use planetsync_core::sync::{
    LatestPlanet, PlanetStore, ReconcileScope, StoreError, UpsertOutcome, UpsertResult,
};
use sqlx::{Acquire, PgPool, Postgres, Transaction};

use crate::repositories::PlanetRepo;

/// Record store backed by the `planets` table.
#[derive(Clone)]
pub struct PgPlanetStore {
    pool: PgPool,
}

impl PgPlanetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One open transaction covering a whole sync run.
pub struct PgReconcileScope {
    tx: Transaction<'static, Postgres>,
}

fn store_error(err: sqlx::Error) -> StoreError {
    StoreError(err.to_string())
}

fn record_error(err: sqlx::Error) -> RecordError {
    RecordError::Store(err.to_string())
}

#[async_trait]
impl PlanetStore for PgPlanetStore {
    type Scope = PgReconcileScope;

    async fn begin(&self) -> Result<PgReconcileScope, StoreError> {
        let tx = self.pool.begin().await.map_err(store_error)?;
        Ok(PgReconcileScope { tx })
    }

    async fn count(&self) -> Result<i64, StoreError> {
        PlanetRepo::count(&self.pool).await.map_err(store_error)
    }

    async fn latest_updated(&self) -> Result<Option<LatestPlanet>, StoreError> {
        let latest = PlanetRepo::find_latest_updated(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(latest.map(|planet| LatestPlanet {
            name: planet.name,
            updated_at: planet.updated_at,
        }))
    }
}

#[async_trait]
impl ReconcileScope for PgReconcileScope {
    async fn upsert_by_external_id(
        &mut self,
        external_id: Option<&str>,
        fields: &PlanetFields,
    ) -> Result<UpsertResult, RecordError> {
        let mut savepoint = self.tx.begin().await.map_err(record_error)?;

        match PlanetRepo::upsert_by_external_id(&mut *savepoint, external_id, fields).await {
            Ok(row) => {
                savepoint.commit().await.map_err(record_error)?;
                let outcome = if row.inserted {
                    UpsertOutcome::Created
                } else {
                    UpsertOutcome::Updated
                };
                Ok(UpsertResult {
                    planet_id: row.planet.id,
                    outcome,
                })
            }
            Err(err) => {
                if let Err(rollback_err) = savepoint.rollback().await {
                    tracing::error!(error = %rollback_err, "Failed to roll back planet savepoint");
                }
                Err(record_error(err))
            }
        }
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await.map_err(store_error)
    }
}
