//! Resource endpoints.
//!
//! Resources live on a floor of a building, so create and update validate the
//! floor number against the building's floor count.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::PgConnection;

use crate::{
    api::handlers::require_admin,
    api::models::{
        resources::{ListResourcesQuery, ResourceCreate, ResourceResponse, ResourceUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{Buildings, Repository, Resources},
        models::resources::{ResourceFilter, ResourceUpdateDBRequest},
    },
    errors::Error,
    types::{BuildingId, Entity, Operation, ResourceId},
    AppState,
};

/// List resources with optional filters
#[utoipa::path(
    get,
    path = "/api/v1/resources",
    params(ListResourcesQuery),
    tag = "inventory",
    responses(
        (status = 200, description = "List of resources", body = Vec<ResourceResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_resources(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ListResourcesQuery>,
) -> Result<Json<Vec<ResourceResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = ResourceFilter {
        resource_type_id: query.resource_type_id,
        building_id: query.building_id,
        search: query.search.filter(|s| !s.trim().is_empty()),
    };

    let resources = Resources::new(&mut conn).list(&filter).await?;
    Ok(Json(resources.into_iter().map(Into::into).collect()))
}

/// Create a resource (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/resources",
    request_body = ResourceCreate,
    tag = "inventory",
    responses(
        (status = 201, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Invalid floor number"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Building not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ResourceCreate>,
) -> Result<(StatusCode, Json<ResourceResponse>), Error> {
    require_admin(&current_user, Entity::Resources, Operation::CreateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    check_floor(&mut conn, request.building_id, request.floor_number).await?;

    let resource = Resources::new(&mut conn).create(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(resource.into())))
}

/// Get a resource by ID
#[utoipa::path(
    get,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 200, description = "Resource details", body = ResourceResponse),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_resource(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<ResourceId>,
) -> Result<Json<ResourceResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let resource = Resources::new(&mut conn).get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Resource".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(resource.into()))
}

/// Update a resource (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = ResourceUpdate,
    tag = "inventory",
    responses(
        (status = 200, description = "Resource updated", body = ResourceResponse),
        (status = 400, description = "Invalid floor number"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ResourceId>,
    Json(request): Json<ResourceUpdate>,
) -> Result<Json<ResourceResponse>, Error> {
    require_admin(&current_user, Entity::Resources, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let existing = Resources::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Resource".to_string(),
            id: id.to_string(),
        })?;

    // Moving buildings or floors revalidates against the target building.
    let building_id = request.building_id.unwrap_or(existing.building_id);
    let floor_number = request.floor_number.unwrap_or(existing.floor_number);
    check_floor(&mut conn, building_id, floor_number).await?;

    let update = ResourceUpdateDBRequest {
        resource_name: request.resource_name.map(|s| s.trim().to_string()),
        resource_type_id: request.resource_type_id,
        building_id: request.building_id,
        floor_number: request.floor_number,
        description: request.description,
    };

    let resource = Resources::new(&mut conn).update(id, &update).await?;
    Ok(Json(resource.into()))
}

/// Delete a resource (admin only)
///
/// Attached facilities, cupboards and maintenance schedules are removed with
/// it; bookings are kept for history and block deletion while they exist.
#[utoipa::path(
    delete,
    path = "/api/v1/resources/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Resource has bookings"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_resource(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ResourceId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::Resources, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = Resources::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Validate a floor number against the building it belongs to.
///
/// Floor 0 is the ground floor, so valid floors are `0..=total_floors`.
async fn check_floor(conn: &mut PgConnection, building_id: BuildingId, floor_number: i32) -> Result<(), Error> {
    let building = Buildings::new(conn)
        .get_by_id(building_id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Building".to_string(),
            id: building_id.to_string(),
        })?;

    if floor_number < 0 || floor_number > building.total_floors {
        return Err(Error::BadRequest {
            message: format!(
                "Floor number {} is out of range for building '{}' (0 to {})",
                floor_number, building.building_name, building.total_floors
            ),
        });
    }

    Ok(())
}
