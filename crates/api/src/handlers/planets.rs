//! Handlers for the `/planets` resource.
//!
//! Inputs are checked with the `planetsync_core::planet` validators before
//! they reach the repository; the table constraints back them up.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use planetsync_core::error::CoreError;
use planetsync_core::planet::{validate_external_id, validate_name, validate_population};
use planetsync_core::types::DbId;
use planetsync_db::models::planet::{CreatePlanet, Planet, UpdatePlanet};
use planetsync_db::repositories::PlanetRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Planet",
        id,
    })
}

/// POST /api/v1/planets
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePlanet>,
) -> AppResult<(StatusCode, Json<Planet>)> {
    validate_population(input.population)?;
    let input = CreatePlanet {
        external_id: validate_external_id(input.external_id.as_deref())?,
        name: validate_name(&input.name)?,
        ..input
    };

    let planet = PlanetRepo::create(&state.pool, &input).await?;
    tracing::info!(planet_id = planet.id, name = %planet.name, "Planet created");
    Ok((StatusCode::CREATED, Json(planet)))
}

/// GET /api/v1/planets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Planet>>> {
    let planets = PlanetRepo::list(&state.pool).await?;
    Ok(Json(planets))
}

/// GET /api/v1/planets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Planet>> {
    let planet = PlanetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(planet))
}

/// PUT /api/v1/planets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlanet>,
) -> AppResult<Json<Planet>> {
    if let Some(population) = input.population {
        validate_population(population)?;
    }
    let input = UpdatePlanet {
        external_id: validate_external_id(input.external_id.as_deref())?,
        name: input.name.as_deref().map(validate_name).transpose()?,
        ..input
    };

    let planet = PlanetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(planet))
}

/// DELETE /api/v1/planets/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if PlanetRepo::delete(&state.pool, id).await? {
        tracing::info!(planet_id = id, "Planet deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
