//! Building endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::handlers::require_admin,
    api::models::{
        buildings::{BuildingCreate, BuildingResponse, BuildingUpdate},
        users::CurrentUser,
    },
    db::handlers::{Buildings, Repository},
    errors::Error,
    types::{BuildingId, Entity, Operation},
    AppState,
};

/// List all buildings
#[utoipa::path(
    get,
    path = "/api/v1/buildings",
    tag = "inventory",
    responses(
        (status = 200, description = "List of buildings", body = Vec<BuildingResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_buildings(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<BuildingResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let buildings = Buildings::new(&mut conn).list(&()).await?;
    Ok(Json(buildings.into_iter().map(Into::into).collect()))
}

/// Create a building (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/buildings",
    request_body = BuildingCreate,
    tag = "inventory",
    responses(
        (status = 201, description = "Building created", body = BuildingResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Admin role required"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_building(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<BuildingCreate>,
) -> Result<(StatusCode, Json<BuildingResponse>), Error> {
    require_admin(&current_user, Entity::Buildings, Operation::CreateAll)?;

    if request.total_floors < 1 {
        return Err(Error::BadRequest {
            message: "A building must have at least one floor".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let building = Buildings::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(building.into())))
}

/// Get a building by ID
#[utoipa::path(
    get,
    path = "/api/v1/buildings/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 200, description = "Building details", body = BuildingResponse),
        (status = 404, description = "Building not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_building(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<BuildingId>,
) -> Result<Json<BuildingResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let building = Buildings::new(&mut conn).get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Building".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(building.into()))
}

/// Update a building (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/buildings/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = BuildingUpdate,
    tag = "inventory",
    responses(
        (status = 200, description = "Building updated", body = BuildingResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Building not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_building(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BuildingId>,
    Json(request): Json<BuildingUpdate>,
) -> Result<Json<BuildingResponse>, Error> {
    require_admin(&current_user, Entity::Buildings, Operation::UpdateAll)?;

    if matches!(request.total_floors, Some(floors) if floors < 1) {
        return Err(Error::BadRequest {
            message: "A building must have at least one floor".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let building = Buildings::new(&mut conn).update(id, &request.into()).await?;

    Ok(Json(building.into()))
}

/// Delete a building (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/buildings/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 204, description = "Building deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Building not found"),
        (status = 409, description = "Building still has resources"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_building(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BuildingId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::Buildings, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = Buildings::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Building".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
