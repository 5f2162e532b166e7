//! Database repository for maintenance schedules.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::maintenance::{
        MaintenanceCreateDBRequest, MaintenanceDBResponse, MaintenanceFilter,
        MaintenanceUpdateDBRequest,
    },
};
use crate::types::{abbrev_uuid, MaintenanceId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct MaintenanceSchedules<'c> {
    db: &'c mut PgConnection,
}

impl<'c> MaintenanceSchedules<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for MaintenanceSchedules<'_> {
    type CreateRequest = MaintenanceCreateDBRequest;
    type UpdateRequest = MaintenanceUpdateDBRequest;
    type Response = MaintenanceDBResponse;
    type Id = MaintenanceId;
    type Filter = MaintenanceFilter;

    #[instrument(skip(self, request), fields(resource_id = %abbrev_uuid(&request.resource_id)), err)]
    async fn create(&mut self, request: &MaintenanceCreateDBRequest) -> Result<MaintenanceDBResponse> {
        let schedule = sqlx::query_as::<_, MaintenanceDBResponse>(
            r#"
            INSERT INTO maintenance_schedules (id, resource_id, maintenance_type, scheduled_date, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.resource_id)
        .bind(&request.maintenance_type)
        .bind(request.scheduled_date)
        .bind(&request.notes)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(self), fields(maintenance_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: MaintenanceId) -> Result<Option<MaintenanceDBResponse>> {
        let schedule = sqlx::query_as::<_, MaintenanceDBResponse>(
            "SELECT * FROM maintenance_schedules WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(schedule)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &MaintenanceFilter) -> Result<Vec<MaintenanceDBResponse>> {
        let schedules = sqlx::query_as::<_, MaintenanceDBResponse>(
            r#"
            SELECT * FROM maintenance_schedules
            WHERE ($1::maintenance_status IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR resource_id = $2)
            ORDER BY scheduled_date
            "#,
        )
        .bind(filter.status)
        .bind(filter.resource_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(schedules)
    }

    #[instrument(skip(self), fields(maintenance_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: MaintenanceId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM maintenance_schedules WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(maintenance_id = %abbrev_uuid(&id)), err)]
    async fn update(
        &mut self,
        id: MaintenanceId,
        request: &MaintenanceUpdateDBRequest,
    ) -> Result<MaintenanceDBResponse> {
        let schedule = sqlx::query_as::<_, MaintenanceDBResponse>(
            r#"
            UPDATE maintenance_schedules SET
                maintenance_type = COALESCE($2, maintenance_type),
                scheduled_date = COALESCE($3, scheduled_date),
                status = COALESCE($4, status),
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.maintenance_type)
        .bind(request.scheduled_date)
        .bind(request.status)
        .bind(&request.notes)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(schedule)
    }
}
