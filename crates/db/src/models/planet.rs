//! Planet entity model and DTOs.

use planetsync_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `planets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Planet {
    pub id: DbId,
    pub external_id: Option<String>,
    pub name: String,
    pub population: i64,
    pub climates: Json<Vec<String>>,
    pub terrains: Json<Vec<String>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A planet row returned from an upsert, with whether it was inserted.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedPlanet {
    #[sqlx(flatten)]
    pub planet: Planet,
    pub inserted: bool,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a planet by hand.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanet {
    pub external_id: Option<String>,
    pub name: String,
    pub population: i64,
    #[serde(default)]
    pub climates: Vec<String>,
    #[serde(default)]
    pub terrains: Vec<String>,
}

/// DTO for updating a planet. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlanet {
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub population: Option<i64>,
    pub climates: Option<Vec<String>>,
    pub terrains: Option<Vec<String>>,
}
