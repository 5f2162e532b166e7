//! Database repository for facilities.
//!
//! Facilities belong to a resource, so listing is always scoped by resource id.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::facilities::{FacilityCreateDBRequest, FacilityDBResponse, FacilityUpdateDBRequest},
};
use crate::types::{abbrev_uuid, FacilityId, ResourceId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Facilities<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Facilities<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Facilities<'_> {
    type CreateRequest = FacilityCreateDBRequest;
    type UpdateRequest = FacilityUpdateDBRequest;
    type Response = FacilityDBResponse;
    type Id = FacilityId;
    type Filter = ResourceId;

    #[instrument(skip(self, request), fields(resource_id = %abbrev_uuid(&request.resource_id)), err)]
    async fn create(&mut self, request: &FacilityCreateDBRequest) -> Result<FacilityDBResponse> {
        let facility = sqlx::query_as::<_, FacilityDBResponse>(
            r#"
            INSERT INTO facilities (id, resource_id, facility_name, details)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.resource_id)
        .bind(&request.facility_name)
        .bind(&request.details)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(facility)
    }

    #[instrument(skip(self), fields(facility_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: FacilityId) -> Result<Option<FacilityDBResponse>> {
        let facility = sqlx::query_as::<_, FacilityDBResponse>("SELECT * FROM facilities WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(facility)
    }

    #[instrument(skip(self, resource_id), err)]
    async fn list(&mut self, resource_id: &ResourceId) -> Result<Vec<FacilityDBResponse>> {
        let facilities = sqlx::query_as::<_, FacilityDBResponse>(
            "SELECT * FROM facilities WHERE resource_id = $1 ORDER BY facility_name",
        )
        .bind(resource_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(facilities)
    }

    #[instrument(skip(self), fields(facility_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: FacilityId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM facilities WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(facility_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: FacilityId, request: &FacilityUpdateDBRequest) -> Result<FacilityDBResponse> {
        let facility = sqlx::query_as::<_, FacilityDBResponse>(
            r#"
            UPDATE facilities SET
                facility_name = COALESCE($2, facility_name),
                details = COALESCE($3, details),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.facility_name)
        .bind(&request.details)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(facility)
    }
}
