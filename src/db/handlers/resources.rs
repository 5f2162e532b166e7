//! Database repository for bookable resources.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::resources::{
        ResourceCreateDBRequest, ResourceDBResponse, ResourceFilter, ResourceUpdateDBRequest,
    },
};
use crate::types::{abbrev_uuid, ResourceId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

pub struct Resources<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Resources<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl Repository for Resources<'_> {
    type CreateRequest = ResourceCreateDBRequest;
    type UpdateRequest = ResourceUpdateDBRequest;
    type Response = ResourceDBResponse;
    type Id = ResourceId;
    type Filter = ResourceFilter;

    #[instrument(skip(self, request), fields(resource_name = %request.resource_name), err)]
    async fn create(&mut self, request: &ResourceCreateDBRequest) -> Result<ResourceDBResponse> {
        let resource = sqlx::query_as::<_, ResourceDBResponse>(
            r#"
            INSERT INTO resources (id, resource_name, resource_type_id, building_id, floor_number, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.resource_name)
        .bind(request.resource_type_id)
        .bind(request.building_id)
        .bind(request.floor_number)
        .bind(&request.description)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(resource)
    }

    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: ResourceId) -> Result<Option<ResourceDBResponse>> {
        let resource = sqlx::query_as::<_, ResourceDBResponse>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(resource)
    }

    #[instrument(skip(self, filter), err)]
    async fn list(&mut self, filter: &ResourceFilter) -> Result<Vec<ResourceDBResponse>> {
        // Optional filters collapse to TRUE when the bind is NULL.
        let search = filter.search.as_ref().map(|s| format!("%{s}%"));

        let resources = sqlx::query_as::<_, ResourceDBResponse>(
            r#"
            SELECT * FROM resources
            WHERE ($1::uuid IS NULL OR resource_type_id = $1)
              AND ($2::uuid IS NULL OR building_id = $2)
              AND ($3::text IS NULL OR resource_name ILIKE $3)
            ORDER BY resource_name
            "#,
        )
        .bind(filter.resource_type_id)
        .bind(filter.building_id)
        .bind(search)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(resources)
    }

    #[instrument(skip(self), fields(resource_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: ResourceId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, request), fields(resource_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: ResourceId, request: &ResourceUpdateDBRequest) -> Result<ResourceDBResponse> {
        let resource = sqlx::query_as::<_, ResourceDBResponse>(
            r#"
            UPDATE resources SET
                resource_name = COALESCE($2, resource_name),
                resource_type_id = COALESCE($3, resource_type_id),
                building_id = COALESCE($4, building_id),
                floor_number = COALESCE($5, floor_number),
                description = COALESCE($6, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.resource_name)
        .bind(request.resource_type_id)
        .bind(request.building_id)
        .bind(request.floor_number)
        .bind(&request.description)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::buildings::BuildingCreateDBRequest;
    use crate::db::models::resource_types::ResourceTypeCreateDBRequest;
    use crate::db::handlers::{Buildings, ResourceTypes};
    use crate::types::{BuildingId, ResourceTypeId};
    use sqlx::PgPool;

    async fn seed_inventory(conn: &mut PgConnection) -> (ResourceTypeId, BuildingId) {
        let resource_type = ResourceTypes::new(conn)
            .create(&ResourceTypeCreateDBRequest {
                type_name: "Seminar Room".to_string(),
            })
            .await
            .unwrap();

        let building = Buildings::new(conn)
            .create(&BuildingCreateDBRequest {
                building_name: "Main Hall".to_string(),
                building_number: "A-1".to_string(),
                total_floors: 3,
            })
            .await
            .unwrap();

        (resource_type.id, building.id)
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_resource_requires_existing_refs(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let err = Resources::new(&mut conn)
            .create(&ResourceCreateDBRequest {
                resource_name: "Room 101".to_string(),
                resource_type_id: Uuid::new_v4(),
                building_id: Uuid::new_v4(),
                floor_number: 1,
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_list_with_filters(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let (type_id, building_id) = seed_inventory(&mut conn).await;

        let mut repo = Resources::new(&mut conn);
        for name in ["Room 101", "Room 102", "Projector Cart"] {
            repo.create(&ResourceCreateDBRequest {
                resource_name: name.to_string(),
                resource_type_id: type_id,
                building_id,
                floor_number: 1,
                description: None,
            })
            .await
            .unwrap();
        }

        let all = repo.list(&ResourceFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let rooms = repo
            .list(&ResourceFilter {
                search: Some("room".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(rooms.len(), 2);

        let none = repo
            .list(&ResourceFilter {
                building_id: Some(Uuid::new_v4()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_negative_floor_is_check_violation(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let (type_id, building_id) = seed_inventory(&mut conn).await;

        let err = Resources::new(&mut conn)
            .create(&ResourceCreateDBRequest {
                resource_name: "Basement Store".to_string(),
                resource_type_id: type_id,
                building_id,
                floor_number: -1,
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
