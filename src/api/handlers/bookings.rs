//! Booking endpoints: creation with conflict detection, listing, and the
//! approval workflow.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    api::models::{
        bookings::{BookingCreate, BookingResponse, BookingStatus, ListBookingsQuery},
        users::CurrentUser,
    },
    db::{
        handlers::{Bookings, Repository, Resources},
        models::bookings::{BookingCreateDBRequest, BookingFilter, BookingTransitionDBRequest},
    },
    errors::Error,
    types::{BookingId, Entity, Operation, Permission},
    AppState,
};

/// List bookings
///
/// Admins see all bookings; everyone else only their own. An optional status
/// query parameter narrows the result.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(ListBookingsQuery),
    tag = "bookings",
    responses(
        (status = 200, description = "List of bookings", body = Vec<BookingResponse>),
        (status = 401, description = "Not authenticated"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_bookings(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let filter = BookingFilter {
        user_id: (!current_user.is_admin()).then_some(current_user.id),
        status: query.status,
    };

    let bookings = Bookings::new(&mut conn).list(&filter).await?;
    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// Create a booking
///
/// The requested window is half-open: a booking ending at 10:00 does not
/// collide with one starting at 10:00. The overlap check and the insert run in
/// one transaction so concurrent requests cannot double-book a slot.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = BookingCreate,
    tag = "bookings",
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Invalid time window"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Time slot already booked"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<BookingCreate>,
) -> Result<(StatusCode, Json<BookingResponse>), Error> {
    if request.start_time >= request.end_time {
        return Err(Error::BadRequest {
            message: "Booking start time must be before end time".to_string(),
        });
    }

    if request.start_time < Utc::now() {
        return Err(Error::BadRequest {
            message: "Booking start time must be in the future".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    if Resources::new(&mut tx).get_by_id(request.resource_id).await?.is_none() {
        return Err(Error::NotFound {
            resource: "Resource".to_string(),
            id: request.resource_id.to_string(),
        });
    }

    let mut bookings = Bookings::new(&mut tx);
    if bookings
        .has_conflict(request.resource_id, request.start_time, request.end_time)
        .await?
    {
        return Err(Error::Conflict {
            message: "The requested time slot conflicts with an existing booking".to_string(),
        });
    }

    let booking = bookings
        .create(&BookingCreateDBRequest {
            resource_id: request.resource_id,
            user_id: current_user.id,
            start_time: request.start_time,
            end_time: request.end_time,
            purpose: request.purpose.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        })
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Get a booking by ID
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "bookings",
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingResponse>, Error> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    let booking = Bookings::new(&mut conn).get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Booking".to_string(),
        id: id.to_string(),
    })?;

    if booking.user_id != current_user.id && !current_user.is_admin() {
        return Err(Error::InsufficientPermissions {
            required: Permission::Owner,
            action: Operation::ReadOwn,
            resource: "booking".to_string(),
        });
    }

    Ok(Json(booking.into()))
}

/// Approve a pending booking (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/approve",
    params(("id" = String, Path, format = "uuid")),
    tag = "bookings",
    responses(
        (status = 200, description = "Booking approved", body = BookingResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Booking not found"),
        (status = 400, description = "Booking is not pending"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn approve_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingResponse>, Error> {
    transition_as_admin(&state, &current_user, id, BookingStatus::Approved).await
}

/// Reject a pending booking (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/reject",
    params(("id" = String, Path, format = "uuid")),
    tag = "bookings",
    responses(
        (status = 200, description = "Booking rejected", body = BookingResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Booking not found"),
        (status = 400, description = "Booking is not pending"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn reject_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingResponse>, Error> {
    transition_as_admin(&state, &current_user, id, BookingStatus::Rejected).await
}

/// Cancel a booking
///
/// Owners can cancel their own bookings; admins can cancel any. Allowed from
/// PENDING or APPROVED.
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{id}/cancel",
    params(("id" = String, Path, format = "uuid")),
    tag = "bookings",
    responses(
        (status = 200, description = "Booking cancelled", body = BookingResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
        (status = 400, description = "Booking already finalized"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BookingId>,
) -> Result<Json<BookingResponse>, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut bookings = Bookings::new(&mut tx);

    let booking = bookings.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Booking".to_string(),
        id: id.to_string(),
    })?;

    if booking.user_id != current_user.id && !current_user.is_admin() {
        return Err(Error::InsufficientPermissions {
            required: Permission::Owner,
            action: Operation::UpdateOwn,
            resource: "booking".to_string(),
        });
    }

    if !booking.status.can_transition_to(BookingStatus::Cancelled) {
        return Err(Error::BadRequest {
            message: format!("Cannot cancel a booking with status {:?}", booking.status),
        });
    }

    let cancelled = bookings
        .transition(
            id,
            &BookingTransitionDBRequest {
                status: BookingStatus::Cancelled,
                approver_id: None,
            },
        )
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(cancelled.into()))
}

/// Delete a booking
///
/// Removes the record entirely. Owners can delete their own bookings; admins
/// can delete any.
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    params(("id" = String, Path, format = "uuid")),
    tag = "bookings",
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Booking not found"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<BookingId>,
) -> Result<StatusCode, Error> {
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut bookings = Bookings::new(&mut tx);

    let booking = bookings.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Booking".to_string(),
        id: id.to_string(),
    })?;

    if booking.user_id != current_user.id && !current_user.is_admin() {
        return Err(Error::InsufficientPermissions {
            required: Permission::Owner,
            action: Operation::DeleteOwn,
            resource: "booking".to_string(),
        });
    }

    bookings.delete(id).await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Shared approve/reject path. Both are admin-only and only valid from PENDING;
/// the acting admin is recorded as the approver.
async fn transition_as_admin(
    state: &AppState,
    current_user: &CurrentUser,
    id: BookingId,
    next: BookingStatus,
) -> Result<Json<BookingResponse>, Error> {
    if !current_user.is_admin() {
        return Err(Error::InsufficientPermissions {
            required: Permission::Allow(Entity::Bookings, Operation::UpdateAll),
            action: Operation::UpdateAll,
            resource: "booking".to_string(),
        });
    }

    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;
    let mut bookings = Bookings::new(&mut tx);

    let booking = bookings.get_by_id(id).await?.ok_or_else(|| Error::NotFound {
        resource: "Booking".to_string(),
        id: id.to_string(),
    })?;

    if booking.status != BookingStatus::Pending {
        return Err(Error::BadRequest {
            message: format!("Only pending bookings can be {next:?}, current status is {:?}", booking.status),
        });
    }

    let updated = bookings
        .transition(
            id,
            &BookingTransitionDBRequest {
                status: next,
                approver_id: Some(current_user.id),
            },
        )
        .await?;
    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{
        create_test_config, login_as, register_user, seed_admin, seed_resource_via_pool, test_server,
    };
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use sqlx::PgPool;

    async fn booked_server(pool: &PgPool) -> (TestServer, uuid::Uuid) {
        let server = test_server(pool.clone(), create_test_config());
        let resource_id = seed_resource_via_pool(pool).await;
        (server, resource_id)
    }

    fn window_json(resource_id: uuid::Uuid, from_h: i64, to_h: i64) -> serde_json::Value {
        let base = Utc::now() + Duration::days(1);
        json!({
            "resource_id": resource_id,
            "start_time": base + Duration::hours(from_h),
            "end_time": base + Duration::hours(to_h),
            "purpose": "Team meeting",
        })
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_booking_starts_pending(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "booker@example.com", "STUDENT").await;

        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await;
        response.assert_status(StatusCode::CREATED);
        let booking: BookingResponse = response.json();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.approver_id.is_none());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_overlapping_booking_conflicts(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "first@example.com", "STUDENT").await;

        server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .assert_status(StatusCode::CREATED);

        // Overlap from another user still conflicts.
        let other = register_user(&server, "second@example.com", "EMPLOYEE").await;
        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&other)
            .json(&window_json(resource_id, 2, 4))
            .await;
        response.assert_status(StatusCode::CONFLICT);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_back_to_back_bookings_allowed(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "b2b@example.com", "STUDENT").await;

        server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 3, 5))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_invalid_windows_rejected(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "invalid@example.com", "STUDENT").await;

        // start after end
        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 3, 1))
            .await;
        response.assert_status_bad_request();

        // start in the past
        let past = Utc::now() - Duration::hours(2);
        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&json!({
                "resource_id": resource_id,
                "start_time": past,
                "end_time": past + Duration::hours(1),
            }))
            .await;
        response.assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_approval_flow(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "requester@example.com", "EMPLOYEE").await;

        let created: BookingResponse = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .json();

        // Non-admin cannot approve, not even the owner.
        server
            .post(&format!("/api/v1/bookings/{}/approve", created.id))
            .authorization_bearer(&token)
            .await
            .assert_status_forbidden();

        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;
        let response = server
            .post(&format!("/api/v1/bookings/{}/approve", created.id))
            .authorization_bearer(&admin_token)
            .await;
        response.assert_status_ok();
        let approved: BookingResponse = response.json();
        assert_eq!(approved.status, BookingStatus::Approved);
        assert!(approved.approver_id.is_some());

        // A second approval is rejected as invalid input: the booking is no
        // longer pending.
        server
            .post(&format!("/api/v1/bookings/{}/approve", created.id))
            .authorization_bearer(&admin_token)
            .await
            .assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_cancel_releases_slot(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "canceller@example.com", "STUDENT").await;

        let created: BookingResponse = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .json();

        server
            .post(&format!("/api/v1/bookings/{}/cancel", created.id))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        // Cancelling again fails validation: CANCELLED is terminal.
        server
            .post(&format!("/api/v1/bookings/{}/cancel", created.id))
            .authorization_bearer(&token)
            .await
            .assert_status_bad_request();

        // The slot is free again.
        server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_rejected_booking_cannot_be_cancelled(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let token = register_user(&server, "rejected@example.com", "STUDENT").await;

        let created: BookingResponse = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(resource_id, 1, 3))
            .await
            .json();

        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;
        server
            .post(&format!("/api/v1/bookings/{}/reject", created.id))
            .authorization_bearer(&admin_token)
            .await
            .assert_status_ok();

        server
            .post(&format!("/api/v1/bookings/{}/cancel", created.id))
            .authorization_bearer(&token)
            .await
            .assert_status_bad_request();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_listing_scoped_to_owner(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let alice = register_user(&server, "alice@example.com", "STUDENT").await;
        let bob = register_user(&server, "bob@example.com", "EMPLOYEE").await;

        server
            .post("/api/v1/bookings")
            .authorization_bearer(&alice)
            .json(&window_json(resource_id, 1, 2))
            .await
            .assert_status(StatusCode::CREATED);
        server
            .post("/api/v1/bookings")
            .authorization_bearer(&bob)
            .json(&window_json(resource_id, 3, 4))
            .await
            .assert_status(StatusCode::CREATED);

        let alices: Vec<BookingResponse> = server.get("/api/v1/bookings").authorization_bearer(&alice).await.json();
        assert_eq!(alices.len(), 1);

        // Admins see everything, and can filter by status.
        let admin = seed_admin(&pool).await;
        let admin_token = login_as(&server, &admin).await;
        let all: Vec<BookingResponse> = server.get("/api/v1/bookings").authorization_bearer(&admin_token).await.json();
        assert_eq!(all.len(), 2);

        let cancelled: Vec<BookingResponse> = server
            .get("/api/v1/bookings?status=CANCELLED")
            .authorization_bearer(&admin_token)
            .await
            .json();
        assert!(cancelled.is_empty());

        // Bob cannot fetch Alice's booking directly either.
        let foreign = server
            .get(&format!("/api/v1/bookings/{}", alices[0].id))
            .authorization_bearer(&bob)
            .await;
        foreign.assert_status_forbidden();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_booking(pool: PgPool) {
        let (server, resource_id) = booked_server(&pool).await;
        let owner = register_user(&server, "deleter@example.com", "STUDENT").await;
        let other = register_user(&server, "nosy@example.com", "STUDENT").await;

        let created: BookingResponse = server
            .post("/api/v1/bookings")
            .authorization_bearer(&owner)
            .json(&window_json(resource_id, 1, 2))
            .await
            .json();

        server
            .delete(&format!("/api/v1/bookings/{}", created.id))
            .authorization_bearer(&other)
            .await
            .assert_status_forbidden();

        server
            .delete(&format!("/api/v1/bookings/{}", created.id))
            .authorization_bearer(&owner)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/bookings/{}", created.id))
            .authorization_bearer(&owner)
            .await
            .assert_status_not_found();
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_booking_unknown_resource_not_found(pool: PgPool) {
        let (server, _) = booked_server(&pool).await;
        let token = register_user(&server, "ghost@example.com", "STUDENT").await;

        let response = server
            .post("/api/v1/bookings")
            .authorization_bearer(&token)
            .json(&window_json(uuid::Uuid::new_v4(), 1, 2))
            .await;
        response.assert_status_not_found();
    }
}
