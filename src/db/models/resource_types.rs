//! Database models for resource types.

use crate::api::models::resource_types::{ResourceTypeCreate, ResourceTypeUpdate};
use crate::types::ResourceTypeId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct ResourceTypeCreateDBRequest {
    pub type_name: String,
}

impl From<ResourceTypeCreate> for ResourceTypeCreateDBRequest {
    fn from(api: ResourceTypeCreate) -> Self {
        Self {
            type_name: api.type_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceTypeUpdateDBRequest {
    pub type_name: Option<String>,
}

impl From<ResourceTypeUpdate> for ResourceTypeUpdateDBRequest {
    fn from(api: ResourceTypeUpdate) -> Self {
        Self {
            type_name: api.type_name.map(|s| s.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResourceTypeDBResponse {
    pub id: ResourceTypeId,
    pub type_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
