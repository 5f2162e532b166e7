//! Database models for bookable resources.

use crate::api::models::resources::ResourceCreate;
use crate::types::{BuildingId, ResourceId, ResourceTypeId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ResourceCreateDBRequest {
    pub resource_name: String,
    pub resource_type_id: ResourceTypeId,
    pub building_id: BuildingId,
    pub floor_number: i32,
    pub description: Option<String>,
}

impl From<ResourceCreate> for ResourceCreateDBRequest {
    fn from(api: ResourceCreate) -> Self {
        Self {
            resource_name: api.resource_name.trim().to_string(),
            resource_type_id: api.resource_type_id,
            building_id: api.building_id,
            floor_number: api.floor_number,
            description: api.description.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Filter for listing resources. All fields are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub resource_type_id: Option<ResourceTypeId>,
    pub building_id: Option<BuildingId>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ResourceUpdateDBRequest {
    pub resource_name: Option<String>,
    pub resource_type_id: Option<ResourceTypeId>,
    pub building_id: Option<BuildingId>,
    pub floor_number: Option<i32>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceDBResponse {
    pub id: ResourceId,
    pub resource_name: String,
    pub resource_type_id: ResourceTypeId,
    pub building_id: BuildingId,
    pub floor_number: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
