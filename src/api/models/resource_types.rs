//! API request/response models for resource types.

use crate::db::models::resource_types::ResourceTypeDBResponse;
use crate::types::ResourceTypeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceTypeCreate {
    pub type_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResourceTypeUpdate {
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResourceTypeResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: ResourceTypeId,
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceTypeDBResponse> for ResourceTypeResponse {
    fn from(db: ResourceTypeDBResponse) -> Self {
        Self {
            id: db.id,
            type_name: db.type_name,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
