//! Database repository for resource types.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::resource_types::{
        ResourceTypeCreateDBRequest, ResourceTypeDBResponse, ResourceTypeUpdateDBRequest,
    },
};
use crate::types::{abbrev_uuid, ResourceTypeId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct ResourceTypes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> ResourceTypes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for ResourceTypes<'_> {
    type CreateRequest = ResourceTypeCreateDBRequest;
    type UpdateRequest = ResourceTypeUpdateDBRequest;
    type Response = ResourceTypeDBResponse;
    type Id = ResourceTypeId;
    type Filter = ();

    #[instrument(skip(self, request), fields(type_name = %request.type_name), err)]
    async fn create(&mut self, request: &ResourceTypeCreateDBRequest) -> Result<ResourceTypeDBResponse> {
        let resource_type = sqlx::query_as::<_, ResourceTypeDBResponse>(
            "INSERT INTO resource_types (id, type_name) VALUES ($1, $2) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&request.type_name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resource_type)
    }

    #[instrument(skip(self), fields(resource_type_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: ResourceTypeId) -> Result<Option<ResourceTypeDBResponse>> {
        let resource_type =
            sqlx::query_as::<_, ResourceTypeDBResponse>("SELECT * FROM resource_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.db)
                .await?;

        Ok(resource_type)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &()) -> Result<Vec<ResourceTypeDBResponse>> {
        let resource_types = sqlx::query_as::<_, ResourceTypeDBResponse>(
            "SELECT * FROM resource_types ORDER BY type_name",
        )
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resource_types)
    }

    #[instrument(skip(self), fields(resource_type_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: ResourceTypeId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resource_types WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(resource_type_id = %abbrev_uuid(&id)), err)]
    async fn update(
        &mut self,
        id: ResourceTypeId,
        request: &ResourceTypeUpdateDBRequest,
    ) -> Result<ResourceTypeDBResponse> {
        let resource_type = sqlx::query_as::<_, ResourceTypeDBResponse>(
            r#"
            UPDATE resource_types SET
                type_name = COALESCE($2, type_name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.type_name)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(resource_type)
    }
}
