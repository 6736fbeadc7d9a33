//! Repository for the `planets` table.

use planetsync_core::planet::PlanetFields;
use planetsync_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::planet::{CreatePlanet, Planet, UpdatePlanet, UpsertedPlanet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, external_id, name, population, climates, terrains, created_at, updated_at";

/// Provides CRUD and sync operations for planets.
pub struct PlanetRepo;

impl PlanetRepo {
    /// Insert a new planet, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlanet) -> Result<Planet, sqlx::Error> {
        let query = format!(
            "INSERT INTO planets (external_id, name, population, climates, terrains)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planet>(&query)
            .bind(&input.external_id)
            .bind(&input.name)
            .bind(input.population)
            .bind(Json(&input.climates))
            .bind(Json(&input.terrains))
            .fetch_one(pool)
            .await
    }

    /// Find a planet by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets WHERE id = $1");
        sqlx::query_as::<_, Planet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a planet by its upstream identifier.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets WHERE external_id = $1");
        sqlx::query_as::<_, Planet>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// List all planets ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Planet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planets ORDER BY name, id");
        sqlx::query_as::<_, Planet>(&query).fetch_all(pool).await
    }

    /// Update a planet. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlanet,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query = format!(
            "UPDATE planets SET
                external_id = COALESCE($2, external_id),
                name = COALESCE($3, name),
                population = COALESCE($4, population),
                climates = COALESCE($5, climates),
                terrains = COALESCE($6, terrains)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planet>(&query)
            .bind(id)
            .bind(&input.external_id)
            .bind(&input.name)
            .bind(input.population)
            .bind(input.climates.as_ref().map(Json))
            .bind(input.terrains.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete a planet by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM planets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count all planets.
    pub async fn count<'e, E: PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM planets")
            .fetch_one(executor)
            .await
    }

    /// The most recently written planet. Ties on `updated_at` go to the
    /// highest id.
    pub async fn find_latest_updated<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Option<Planet>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM planets ORDER BY updated_at DESC, id DESC LIMIT 1");
        sqlx::query_as::<_, Planet>(&query)
            .fetch_optional(executor)
            .await
    }

    /// Insert a planet, or overwrite the row that already holds
    /// `external_id`.
    ///
    /// Uses `ON CONFLICT (external_id) DO UPDATE`; a `NULL` external id
    /// never conflicts, so it always inserts. `created_at` is left untouched
    /// on update, and `updated_at` is the wall-clock time of this write rather
    /// than the transaction start. `xmax = 0` identifies rows that were
    /// freshly inserted.
    pub async fn upsert_by_external_id<'e, E: PgExecutor<'e>>(
        executor: E,
        external_id: Option<&str>,
        fields: &PlanetFields,
    ) -> Result<UpsertedPlanet, sqlx::Error> {
        let query = format!(
            "INSERT INTO planets (external_id, name, population, climates, terrains)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (external_id) DO UPDATE SET
                 name = EXCLUDED.name,
                 population = EXCLUDED.population,
                 climates = EXCLUDED.climates,
                 terrains = EXCLUDED.terrains,
                 updated_at = clock_timestamp()
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedPlanet>(&query)
            .bind(external_id)
            .bind(&fields.name)
            .bind(fields.population)
            .bind(Json(&fields.climates))
            .bind(Json(&fields.terrains))
            .fetch_one(executor)
            .await
    }
}
