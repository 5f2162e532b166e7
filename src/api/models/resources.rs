//! API request/response models for bookable resources.

use crate::db::models::resources::ResourceDBResponse;
use crate::types::{BuildingId, ResourceId, ResourceTypeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceCreate {
    pub resource_name: String,
    #[schema(value_type = String, format = "uuid")]
    pub resource_type_id: ResourceTypeId,
    #[schema(value_type = String, format = "uuid")]
    pub building_id: BuildingId,
    pub floor_number: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResourceUpdate {
    pub resource_name: Option<String>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub resource_type_id: Option<ResourceTypeId>,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub building_id: Option<BuildingId>,
    pub floor_number: Option<i32>,
    pub description: Option<String>,
}

/// Query parameters for listing resources
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListResourcesQuery {
    /// Filter by resource type
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub resource_type_id: Option<ResourceTypeId>,

    /// Filter by building
    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub building_id: Option<BuildingId>,

    /// Case-insensitive substring match on the resource name
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ResourceId,
    pub resource_name: String,
    #[schema(value_type = String, format = "uuid")]
    pub resource_type_id: ResourceTypeId,
    #[schema(value_type = String, format = "uuid")]
    pub building_id: BuildingId,
    pub floor_number: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceDBResponse> for ResourceResponse {
    fn from(db: ResourceDBResponse) -> Self {
        Self {
            id: db.id,
            resource_name: db.resource_name,
            resource_type_id: db.resource_type_id,
            building_id: db.building_id,
            floor_number: db.floor_number,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
