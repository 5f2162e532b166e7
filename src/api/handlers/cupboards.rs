//! Cupboard endpoints, nested under a resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgConnection;

use crate::{
    api::handlers::require_admin,
    api::models::{
        cupboards::{CupboardCreate, CupboardResponse, CupboardUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{Cupboards, Repository, Resources},
        models::cupboards::CupboardCreateDBRequest,
    },
    errors::Error,
    types::{CupboardId, Entity, Operation, ResourceId},
    AppState,
};

/// List cupboards of a resource
#[utoipa::path(
    get,
    path = "/api/v1/resources/{resource_id}/cupboards",
    params(("resource_id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 200, description = "List of cupboards", body = Vec<CupboardResponse>),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_cupboards(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(resource_id): Path<ResourceId>,
) -> Result<Json<Vec<CupboardResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    check_resource_exists(&mut conn, resource_id).await?;

    let cupboards = Cupboards::new(&mut conn).list(&resource_id).await?;
    Ok(Json(cupboards.into_iter().map(Into::into).collect()))
}

/// Add a cupboard to a resource (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/resources/{resource_id}/cupboards",
    params(("resource_id" = String, Path, format = "uuid")),
    request_body = CupboardCreate,
    tag = "inventory",
    responses(
        (status = 201, description = "Cupboard created", body = CupboardResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_cupboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(resource_id): Path<ResourceId>,
    Json(request): Json<CupboardCreate>,
) -> Result<(StatusCode, Json<CupboardResponse>), Error> {
    require_admin(&current_user, Entity::Cupboards, Operation::CreateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    check_resource_exists(&mut conn, resource_id).await?;

    let cupboard = Cupboards::new(&mut conn)
        .create(&CupboardCreateDBRequest::new(resource_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(cupboard.into())))
}

/// Update a cupboard (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/cupboards/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = CupboardUpdate,
    tag = "inventory",
    responses(
        (status = 200, description = "Cupboard updated", body = CupboardResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Cupboard not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_cupboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CupboardId>,
    Json(request): Json<CupboardUpdate>,
) -> Result<Json<CupboardResponse>, Error> {
    require_admin(&current_user, Entity::Cupboards, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let cupboard = Cupboards::new(&mut conn).update(id, &request.into()).await?;

    Ok(Json(cupboard.into()))
}

/// Remove a cupboard (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/cupboards/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 204, description = "Cupboard deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Cupboard not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_cupboard(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<CupboardId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::Cupboards, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = Cupboards::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Cupboard".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn check_resource_exists(conn: &mut PgConnection, resource_id: ResourceId) -> Result<(), Error> {
    if Resources::new(conn).get_by_id(resource_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: resource_id.to_string(),
        });
    }
    Ok(())
}
