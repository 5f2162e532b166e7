//! Maintenance schedule endpoints. Admin only, including reads.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::handlers::require_admin,
    api::models::{
        maintenance::{ListMaintenanceQuery, MaintenanceCreate, MaintenanceResponse, MaintenanceUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{MaintenanceSchedules, Repository, Resources},
        models::maintenance::MaintenanceFilter,
    },
    errors::Error,
    types::{Entity, MaintenanceId, Operation},
    AppState,
};

/// List maintenance schedules (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/maintenance",
    params(ListMaintenanceQuery),
    tag = "maintenance",
    responses(
        (status = 200, description = "List of maintenance schedules", body = Vec<MaintenanceResponse>),
        (status = 403, description = "Admin role required"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_maintenance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListMaintenanceQuery>,
) -> Result<Json<Vec<MaintenanceResponse>>, Error> {
    require_admin(&current_user, Entity::Maintenance, Operation::ReadAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = MaintenanceFilter {
        status: query.status,
        resource_id: query.resource_id,
    };

    let schedules = MaintenanceSchedules::new(&mut conn).list(&filter).await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// Schedule maintenance for a resource (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/maintenance",
    request_body = MaintenanceCreate,
    tag = "maintenance",
    responses(
        (status = 201, description = "Maintenance scheduled", body = MaintenanceResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<MaintenanceCreate>,
) -> Result<(StatusCode, Json<MaintenanceResponse>), Error> {
    require_admin(&current_user, Entity::Maintenance, Operation::CreateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Resources::new(&mut conn).get_by_id(request.resource_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: request.resource_id.to_string(),
        });
    }

    let schedule = MaintenanceSchedules::new(&mut conn).create(&request.into()).await?;
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

/// Get a maintenance schedule by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/maintenance/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "maintenance",
    responses(
        (status = 200, description = "Maintenance schedule details", body = MaintenanceResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Maintenance schedule not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_maintenance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MaintenanceId>,
) -> Result<Json<MaintenanceResponse>, Error> {
    require_admin(&current_user, Entity::Maintenance, Operation::ReadAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let schedule = MaintenanceSchedules::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Maintenance schedule".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(schedule.into()))
}

/// Update a maintenance schedule (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/maintenance/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = MaintenanceUpdate,
    tag = "maintenance",
    responses(
        (status = 200, description = "Maintenance schedule updated", body = MaintenanceResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Maintenance schedule not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_maintenance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MaintenanceId>,
    Json(request): Json<MaintenanceUpdate>,
) -> Result<Json<MaintenanceResponse>, Error> {
    require_admin(&current_user, Entity::Maintenance, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let schedule = MaintenanceSchedules::new(&mut conn).update(id, &request.into()).await?;

    Ok(Json(schedule.into()))
}

/// Delete a maintenance schedule (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/maintenance/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "maintenance",
    responses(
        (status = 204, description = "Maintenance schedule deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Maintenance schedule not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_maintenance(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<MaintenanceId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::Maintenance, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = MaintenanceSchedules::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Maintenance schedule".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
