//! Resource type endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::handlers::require_admin,
    api::models::{
        resource_types::{ResourceTypeCreate, ResourceTypeResponse, ResourceTypeUpdate},
        users::CurrentUser,
    },
    db::handlers::{Repository, ResourceTypes},
    errors::Error,
    types::{Entity, Operation, ResourceTypeId},
    AppState,
};

/// List all resource types
#[utoipa::path(
    get,
    path = "/api/v1/resource-types",
    tag = "inventory",
    responses(
        (status = 200, description = "List of resource types", body = Vec<ResourceTypeResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_resource_types(
    State(state): State<AppState>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<ResourceTypeResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let resource_types = ResourceTypes::new(&mut conn).list(&()).await?;
    Ok(Json(resource_types.into_iter().map(Into::into).collect()))
}

/// Create a resource type (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/resource-types",
    request_body = ResourceTypeCreate,
    tag = "inventory",
    responses(
        (status = 201, description = "Resource type created", body = ResourceTypeResponse),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Type name already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_resource_type(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<ResourceTypeCreate>,
) -> Result<(StatusCode, Json<ResourceTypeResponse>), Error> {
    require_admin(&current_user, Entity::ResourceTypes, Operation::CreateAll)?;

    if request.type_name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "Type name must not be empty".to_string(),
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let resource_type = ResourceTypes::new(&mut conn).create(&request.into()).await?;

    Ok((StatusCode::CREATED, Json(resource_type.into())))
}

/// Get a resource type by ID
#[utoipa::path(
    get,
    path = "/api/v1/resource-types/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 200, description = "Resource type details", body = ResourceTypeResponse),
        (status = 404, description = "Resource type not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_resource_type(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(id): Path<ResourceTypeId>,
) -> Result<Json<ResourceTypeResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let resource_type = ResourceTypes::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound {
            resource: "Resource type".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(resource_type.into()))
}

/// Update a resource type (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/resource-types/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = ResourceTypeUpdate,
    tag = "inventory",
    responses(
        (status = 200, description = "Resource type updated", body = ResourceTypeResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource type not found"),
        (status = 409, description = "Type name already exists"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_resource_type(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ResourceTypeId>,
    Json(request): Json<ResourceTypeUpdate>,
) -> Result<Json<ResourceTypeResponse>, Error> {
    require_admin(&current_user, Entity::ResourceTypes, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let resource_type = ResourceTypes::new(&mut conn).update(id, &request.into()).await?;

    Ok(Json(resource_type.into()))
}

/// Delete a resource type (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/resource-types/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 204, description = "Resource type deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource type not found"),
        (status = 409, description = "Resource type still in use"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_resource_type(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<ResourceTypeId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::ResourceTypes, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = ResourceTypes::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Resource type".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, login_as, register_user, seed_admin, test_server};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_duplicate_type_name_conflicts(pool: PgPool) {
        let server = test_server(pool.clone(), create_test_config());
        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;

        let body = json!({"type_name": "Meeting Room"});
        server
            .post("/api/v1/resource-types")
            .authorization_bearer(&admin_token)
            .json(&body)
            .await
            .assert_status(StatusCode::CREATED);

        let response = server.post("/api/v1/resource-types").authorization_bearer(&admin_token).json(&body).await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_non_admin_cannot_mutate(pool: PgPool) {
        let server = test_server(pool.clone(), create_test_config());
        let employee = register_user(&server, "emp@example.com", "EMPLOYEE").await;

        server
            .post("/api/v1/resource-types")
            .authorization_bearer(&employee)
            .json(&json!({"type_name": "Lab"}))
            .await
            .assert_status_forbidden();

        // But reads are fine.
        server.get("/api/v1/resource-types").authorization_bearer(&employee).await.assert_status_ok();
    }
}
