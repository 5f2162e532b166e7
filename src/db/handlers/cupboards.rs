//! Database repository for cupboards.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::cupboards::{CupboardCreateDBRequest, CupboardDBResponse, CupboardUpdateDBRequest},
};
use crate::types::{abbrev_uuid, CupboardId, ResourceId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Cupboards<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Cupboards<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Cupboards<'_> {
    type CreateRequest = CupboardCreateDBRequest;
    type UpdateRequest = CupboardUpdateDBRequest;
    type Response = CupboardDBResponse;
    type Id = CupboardId;
    type Filter = ResourceId;

    #[instrument(skip(self, request), fields(resource_id = %abbrev_uuid(&request.resource_id)), err)]
    async fn create(&mut self, request: &CupboardCreateDBRequest) -> Result<CupboardDBResponse> {
        let cupboard = sqlx::query_as::<_, CupboardDBResponse>(
            r#"
            INSERT INTO cupboards (id, resource_id, cupboard_number, shelf_count, contents_description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.resource_id)
        .bind(&request.cupboard_number)
        .bind(request.shelf_count)
        .bind(&request.contents_description)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(cupboard)
    }

    #[instrument(skip(self), fields(cupboard_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: CupboardId) -> Result<Option<CupboardDBResponse>> {
        let cupboard = sqlx::query_as::<_, CupboardDBResponse>("SELECT * FROM cupboards WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(cupboard)
    }

    #[instrument(skip(self, resource_id), err)]
    async fn list(&mut self, resource_id: &ResourceId) -> Result<Vec<CupboardDBResponse>> {
        let cupboards = sqlx::query_as::<_, CupboardDBResponse>(
            "SELECT * FROM cupboards WHERE resource_id = $1 ORDER BY cupboard_number",
        )
        .bind(resource_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(cupboards)
    }

    #[instrument(skip(self), fields(cupboard_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: CupboardId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cupboards WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(cupboard_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: CupboardId, request: &CupboardUpdateDBRequest) -> Result<CupboardDBResponse> {
        let cupboard = sqlx::query_as::<_, CupboardDBResponse>(
            r#"
            UPDATE cupboards SET
                cupboard_number = COALESCE($2, cupboard_number),
                shelf_count = COALESCE($3, shelf_count),
                contents_description = COALESCE($4, contents_description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.cupboard_number)
        .bind(request.shelf_count)
        .bind(&request.contents_description)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(cupboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::seed_resource;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_cupboard_crud(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let resource_id = seed_resource(&mut conn).await;

        let mut repo = Cupboards::new(&mut conn);
        let created = repo
            .create(&CupboardCreateDBRequest {
                resource_id,
                cupboard_number: "C-04".to_string(),
                shelf_count: Some(5),
                contents_description: None,
            })
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                &CupboardUpdateDBRequest {
                    contents_description: Some("Lab glassware".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.shelf_count, Some(5));
        assert_eq!(updated.contents_description.as_deref(), Some("Lab glassware"));

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
