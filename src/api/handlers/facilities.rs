//! Facility endpoints, nested under a resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgConnection;

use crate::{
    api::handlers::require_admin,
    api::models::{
        facilities::{FacilityCreate, FacilityResponse, FacilityUpdate},
        users::CurrentUser,
    },
    db::{
        handlers::{Facilities, Repository, Resources},
        models::facilities::FacilityCreateDBRequest,
    },
    errors::Error,
    types::{Entity, FacilityId, Operation, ResourceId},
    AppState,
};

/// List facilities of a resource
#[utoipa::path(
    get,
    path = "/api/v1/resources/{resource_id}/facilities",
    params(("resource_id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 200, description = "List of facilities", body = Vec<FacilityResponse>),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_facilities(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Path(resource_id): Path<ResourceId>,
) -> Result<Json<Vec<FacilityResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    check_resource_exists(&mut conn, resource_id).await?;

    let facilities = Facilities::new(&mut conn).list(&resource_id).await?;
    Ok(Json(facilities.into_iter().map(Into::into).collect()))
}

/// Add a facility to a resource (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/resources/{resource_id}/facilities",
    params(("resource_id" = String, Path, format = "uuid")),
    request_body = FacilityCreate,
    tag = "inventory",
    responses(
        (status = 201, description = "Facility created", body = FacilityResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Resource not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_facility(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(resource_id): Path<ResourceId>,
    Json(request): Json<FacilityCreate>,
) -> Result<(StatusCode, Json<FacilityResponse>), Error> {
    require_admin(&current_user, Entity::Facilities, Operation::CreateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    check_resource_exists(&mut conn, resource_id).await?;

    let facility = Facilities::new(&mut conn)
        .create(&FacilityCreateDBRequest::new(resource_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(facility.into())))
}

/// Update a facility (admin only)
#[utoipa::path(
    patch,
    path = "/api/v1/facilities/{id}",
    params(("id" = String, Path, format = "uuid")),
    request_body = FacilityUpdate,
    tag = "inventory",
    responses(
        (status = 200, description = "Facility updated", body = FacilityResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Facility not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_facility(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<FacilityId>,
    Json(request): Json<FacilityUpdate>,
) -> Result<Json<FacilityResponse>, Error> {
    require_admin(&current_user, Entity::Facilities, Operation::UpdateAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let facility = Facilities::new(&mut conn).update(id, &request.into()).await?;

    Ok(Json(facility.into()))
}

/// Remove a facility (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/facilities/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "inventory",
    responses(
        (status = 204, description = "Facility deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Facility not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_facility(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<FacilityId>,
) -> Result<StatusCode, Error> {
    require_admin(&current_user, Entity::Facilities, Operation::DeleteAll)?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let deleted = Facilities::new(&mut conn).delete(id).await?;

    if !deleted {
        return Err(Error::NotFound {
            resource: "Facility".to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, login_as, register_user, seed_admin, seed_resource_via_pool, test_server};
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_facility_lifecycle(pool: PgPool) {
        let server = test_server(pool.clone(), create_test_config());
        let resource_id = seed_resource_via_pool(&pool).await;
        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;

        let response = server
            .post(&format!("/api/v1/resources/{resource_id}/facilities"))
            .authorization_bearer(&admin_token)
            .json(&json!({"facility_name": "Projector", "details": "4K"}))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: FacilityResponse = response.json();

        let updated: FacilityResponse = server
            .patch(&format!("/api/v1/facilities/{}", created.id))
            .authorization_bearer(&admin_token)
            .json(&json!({"details": "4K, HDMI only"}))
            .await
            .json();
        assert_eq!(updated.details.as_deref(), Some("4K, HDMI only"));

        // Students can read but not change.
        let student = register_user(&server, "viewer@example.com", "STUDENT").await;
        let listed: Vec<FacilityResponse> = server
            .get(&format!("/api/v1/resources/{resource_id}/facilities"))
            .authorization_bearer(&student)
            .await
            .json();
        assert_eq!(listed.len(), 1);
        server
            .delete(&format!("/api/v1/facilities/{}", created.id))
            .authorization_bearer(&student)
            .await
            .assert_status_forbidden();

        server
            .delete(&format!("/api/v1/facilities/{}", created.id))
            .authorization_bearer(&admin_token)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_unknown_resource_is_not_found(pool: PgPool) {
        let server = test_server(pool.clone(), create_test_config());
        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;

        server
            .post(&format!("/api/v1/resources/{}/facilities", uuid::Uuid::new_v4()))
            .authorization_bearer(&admin_token)
            .json(&json!({"facility_name": "Ghost"}))
            .await
            .assert_status_not_found();
    }
}
