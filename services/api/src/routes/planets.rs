//! Planet catalog endpoints

use axum::{
    Extension, Form, Json,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    http::StatusCode,
};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{MessageResponse, Planet, PlanetForm, UpdatePlanetForm},
    repositories::StorageError,
    state::AppState,
    validation::parse_id,
};

const PLANET_MISSING: &str = "That planet does not exist.";
const PLANET_EXISTS: &str = "There is already a planet by that name";

fn planet_missing() -> ApiError {
    ApiError::NotFound(PLANET_MISSING.to_string())
}

/// Ids that do not parse cannot name an existing planet
fn path_planet_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i32> {
    let Path(raw_id) = path?;
    parse_id("planet_id", &raw_id).map_err(|_| planet_missing())
}

fn name_conflict(err: StorageError) -> ApiError {
    match err {
        StorageError::AlreadyExists(_) => ApiError::Conflict(PLANET_EXISTS.to_string()),
        other => other.into(),
    }
}

/// List every planet
pub async fn list_planets(State(state): State<AppState>) -> ApiResult<Json<Vec<Planet>>> {
    let planets = state.planet_repository.list().await?;
    Ok(Json(planets))
}

/// Get one planet by id
pub async fn planet_details(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Planet>> {
    let planet_id = path_planet_id(path)?;

    let planet = state
        .planet_repository
        .find_by_id(planet_id)
        .await?
        .ok_or_else(planet_missing)?;

    Ok(Json(planet))
}

/// Add a planet to the catalog
pub async fn add_planet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    form: Result<Form<PlanetForm>, FormRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Form(form) = form?;
    let new_planet = form.validate().map_err(ApiError::Validation)?;

    let planet = state
        .planet_repository
        .create(&new_planet)
        .await
        .map_err(name_conflict)?;

    info!(
        "Planet {} ({}) added by {}",
        planet.planet_name, planet.planet_id, user.email
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("You added a planet")),
    ))
}

/// Overwrite every field of an existing planet
pub async fn update_planet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    form: Result<Form<UpdatePlanetForm>, FormRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Form(UpdatePlanetForm { planet_id, planet }) = form?;
    let planet_id = parse_id("planet_id", &planet_id).map_err(ApiError::Validation)?;
    let new_planet = planet.validate().map_err(ApiError::Validation)?;

    state
        .planet_repository
        .update(planet_id, &new_planet)
        .await
        .map_err(name_conflict)?
        .ok_or_else(planet_missing)?;

    info!("Planet {} updated by {}", planet_id, user.email);

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("You updated a planet")),
    ))
}

/// Remove a planet from the catalog
pub async fn remove_planet(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let planet_id = path_planet_id(path)?;

    if !state.planet_repository.delete(planet_id).await? {
        return Err(planet_missing());
    }

    info!("Planet {} deleted by {}", planet_id, user.email);

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("You deleted a planet")),
    ))
}
