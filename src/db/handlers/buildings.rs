//! Database repository for buildings.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::buildings::{BuildingCreateDBRequest, BuildingDBResponse, BuildingUpdateDBRequest},
};
use crate::types::{abbrev_uuid, BuildingId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Buildings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Buildings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Buildings<'_> {
    type CreateRequest = BuildingCreateDBRequest;
    type UpdateRequest = BuildingUpdateDBRequest;
    type Response = BuildingDBResponse;
    type Id = BuildingId;
    type Filter = ();

    #[instrument(skip(self, request), fields(building_name = %request.building_name), err)]
    async fn create(&mut self, request: &BuildingCreateDBRequest) -> Result<BuildingDBResponse> {
        let building = sqlx::query_as::<_, BuildingDBResponse>(
            r#"
            INSERT INTO buildings (id, building_name, building_number, total_floors)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.building_name)
        .bind(&request.building_number)
        .bind(request.total_floors)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(building)
    }

    #[instrument(skip(self), fields(building_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: BuildingId) -> Result<Option<BuildingDBResponse>> {
        let building = sqlx::query_as::<_, BuildingDBResponse>("SELECT * FROM buildings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(building)
    }

    #[instrument(skip(self, _filter), err)]
    async fn list(&mut self, _filter: &()) -> Result<Vec<BuildingDBResponse>> {
        let buildings =
            sqlx::query_as::<_, BuildingDBResponse>("SELECT * FROM buildings ORDER BY building_name")
                .fetch_all(&mut *self.db)
                .await?;

        Ok(buildings)
    }

    #[instrument(skip(self), fields(building_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: BuildingId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM buildings WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(building_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: BuildingId, request: &BuildingUpdateDBRequest) -> Result<BuildingDBResponse> {
        let building = sqlx::query_as::<_, BuildingDBResponse>(
            r#"
            UPDATE buildings SET
                building_name = COALESCE($2, building_name),
                building_number = COALESCE($3, building_number),
                total_floors = COALESCE($4, total_floors),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.building_name)
        .bind(&request.building_number)
        .bind(request.total_floors)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(building)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    fn science_block() -> BuildingCreateDBRequest {
        BuildingCreateDBRequest {
            building_name: "Science Block".to_string(),
            building_number: "B-12".to_string(),
            total_floors: 4,
        }
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_and_get_building(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Buildings::new(&mut conn);

        let created = repo.create(&science_block()).await.unwrap();
        assert_eq!(created.total_floors, 4);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.building_name, "Science Block");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_missing_building_is_not_found(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Buildings::new(&mut conn);

        let err = repo
            .update(Uuid::new_v4(), &BuildingUpdateDBRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_building(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = Buildings::new(&mut conn);

        let created = repo.create(&science_block()).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
