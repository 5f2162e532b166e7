//! Database repository for bookings.
//!
//! Bookings don't fit the generic [`super::repository::Repository`] shape: the
//! interesting operations are the overlap check and the status transition, and
//! both need to run against the same connection as the surrounding statements.
//! The handler wraps [`Bookings::has_conflict`] and [`Bookings::create`] in one
//! transaction so two concurrent requests for the same slot cannot both pass
//! the check.

use crate::api::models::bookings::BookingStatus;
use crate::db::{
    errors::{DbError, Result},
    models::bookings::{
        BookingCreateDBRequest, BookingDBResponse, BookingFilter, BookingTransitionDBRequest,
    },
};
use crate::types::{abbrev_uuid, BookingId, ResourceId};
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Bookings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bookings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Whether any PENDING or APPROVED booking on this resource overlaps the
    /// half-open window `[start_time, end_time)`.
    ///
    /// Two half-open intervals overlap iff each one starts before the other
    /// ends, so back-to-back bookings sharing an endpoint do not collide.
    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&resource_id)), err)]
    pub async fn has_conflict(
        &mut self,
        resource_id: ResourceId,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<bool> {
        let conflicts = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE resource_id = $1
              AND status = ANY($2)
              AND start_time < $4
              AND end_time > $3
            "#,
        )
        .bind(resource_id)
        .bind(&BookingStatus::ACTIVE[..])
        .bind(start_time)
        .bind(end_time)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(conflicts > 0)
    }

    #[instrument(skip(self, request), fields(resource_id = %abbrev_uuid(&request.resource_id)), err)]
    pub async fn create(&mut self, request: &BookingCreateDBRequest) -> Result<BookingDBResponse> {
        let booking = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            INSERT INTO bookings (id, resource_id, user_id, start_time, end_time, purpose)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.resource_id)
        .bind(request.user_id)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(&request.purpose)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(booking)
    }

    #[instrument(skip(self), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: BookingId) -> Result<Option<BookingDBResponse>> {
        let booking = sqlx::query_as::<_, BookingDBResponse>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(booking)
    }

    #[instrument(skip(self, filter), err)]
    pub async fn list(&mut self, filter: &BookingFilter) -> Result<Vec<BookingDBResponse>> {
        let bookings = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::booking_status IS NULL OR status = $2)
            ORDER BY start_time DESC
            "#,
        )
        .bind(filter.user_id)
        .bind(filter.status)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }

    /// Apply a status transition. Validation of the transition itself happens
    /// in the handler before this is called.
    #[instrument(skip(self, request), fields(booking_id = %abbrev_uuid(&id), status = ?request.status), err)]
    pub async fn transition(
        &mut self,
        id: BookingId,
        request: &BookingTransitionDBRequest,
    ) -> Result<BookingDBResponse> {
        let booking = sqlx::query_as::<_, BookingDBResponse>(
            r#"
            UPDATE bookings SET
                status = $2,
                approver_id = COALESCE($3, approver_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.status)
        .bind(request.approver_id)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(booking)
    }

    #[instrument(skip(self), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn delete(&mut self, id: BookingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::users::Role;
    use crate::db::handlers::Users;
    use crate::db::models::users::UserCreateDBRequest;
    use crate::test_utils::seed_resource;
    use crate::types::UserId;
    use chrono::Duration;
    use sqlx::PgPool;

    async fn seed_user(conn: &mut PgConnection, email: &str) -> UserId {
        Users::new(conn)
            .create(&UserCreateDBRequest {
                name: "Booker".to_string(),
                email: email.to_string(),
                password_hash: None,
                role: Role::Student,
            })
            .await
            .unwrap()
            .id
    }

    fn window(base: DateTime<Utc>, from_h: i64, to_h: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        (base + Duration::hours(from_h), base + Duration::hours(to_h))
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_overlap_detected_for_pending_booking(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;
        let user_id = seed_user(&mut conn, "overlap@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        let (start, end) = window(base, 1, 3);
        repo.create(&BookingCreateDBRequest {
            resource_id,
            user_id,
            start_time: start,
            end_time: end,
            purpose: None,
        })
        .await
        .unwrap();

        // Partial overlap from either side and full containment all collide.
        let (s, e) = window(base, 2, 4);
        assert!(repo.has_conflict(resource_id, s, e).await.unwrap());
        let (s, e) = window(base, 0, 2);
        assert!(repo.has_conflict(resource_id, s, e).await.unwrap());
        let (s, e) = window(base, 0, 5);
        assert!(repo.has_conflict(resource_id, s, e).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_adjacent_windows_do_not_conflict(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;
        let user_id = seed_user(&mut conn, "adjacent@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        let (start, end) = window(base, 1, 3);
        repo.create(&BookingCreateDBRequest {
            resource_id,
            user_id,
            start_time: start,
            end_time: end,
            purpose: None,
        })
        .await
        .unwrap();

        // A window ending exactly where the other starts is free.
        let (s, e) = window(base, 3, 5);
        assert!(!repo.has_conflict(resource_id, s, e).await.unwrap());
        let (s, e) = window(base, 0, 1);
        assert!(!repo.has_conflict(resource_id, s, e).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_terminal_bookings_release_the_slot(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;
        let user_id = seed_user(&mut conn, "released@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        let (start, end) = window(base, 1, 3);
        let booking = repo
            .create(&BookingCreateDBRequest {
                resource_id,
                user_id,
                start_time: start,
                end_time: end,
                purpose: None,
            })
            .await
            .unwrap();

        repo.transition(
            booking.id,
            &BookingTransitionDBRequest {
                status: BookingStatus::Cancelled,
                approver_id: None,
            },
        )
        .await
        .unwrap();

        assert!(!repo.has_conflict(resource_id, start, end).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_conflict_scoped_to_resource(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_a = seed_resource(&mut conn).await;
        let resource_b = seed_resource(&mut conn).await;
        let user_id = seed_user(&mut conn, "scoped@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        let (start, end) = window(base, 1, 3);
        repo.create(&BookingCreateDBRequest {
            resource_id: resource_a,
            user_id,
            start_time: start,
            end_time: end,
            purpose: None,
        })
        .await
        .unwrap();

        assert!(!repo.has_conflict(resource_b, start, end).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_transition_records_approver(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;
        let user_id = seed_user(&mut conn, "owner@example.com").await;
        let admin_id = seed_user(&mut conn, "admin@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        let (start, end) = window(base, 1, 3);
        let booking = repo
            .create(&BookingCreateDBRequest {
                resource_id,
                user_id,
                start_time: start,
                end_time: end,
                purpose: Some("Project review".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(booking.approver_id.is_none());

        let approved = repo
            .transition(
                booking.id,
                &BookingTransitionDBRequest {
                    status: BookingStatus::Approved,
                    approver_id: Some(admin_id),
                },
            )
            .await
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Approved);
        assert_eq!(approved.approver_id, Some(admin_id));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_filters_by_user_and_status(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;
        let alice = seed_user(&mut conn, "alice@example.com").await;
        let bob = seed_user(&mut conn, "bob@example.com").await;
        let base = Utc::now();

        let mut repo = Bookings::new(&mut conn);
        for (user_id, from_h, to_h) in [(alice, 1, 2), (alice, 3, 4), (bob, 5, 6)] {
            let (start, end) = window(base, from_h, to_h);
            repo.create(&BookingCreateDBRequest {
                resource_id,
                user_id,
                start_time: start,
                end_time: end,
                purpose: None,
            })
            .await
            .unwrap();
        }

        let alices = repo
            .list(&BookingFilter {
                user_id: Some(alice),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(alices.len(), 2);

        let pending = repo
            .list(&BookingFilter {
                user_id: None,
                status: Some(BookingStatus::Pending),
            })
            .await
            .unwrap();
        assert_eq!(pending.len(), 3);

        let cancelled = repo
            .list(&BookingFilter {
                user_id: None,
                status: Some(BookingStatus::Cancelled),
            })
            .await
            .unwrap();
        assert!(cancelled.is_empty());
    }
}
