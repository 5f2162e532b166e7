//! Database models for cupboards and shelving inside a resource.

use crate::api::models::cupboards::{CupboardCreate, CupboardUpdate};
use crate::types::{CupboardId, ResourceId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct CupboardCreateDBRequest {
    pub resource_id: ResourceId,
    pub cupboard_number: String,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
}

impl CupboardCreateDBRequest {
    pub fn new(resource_id: ResourceId, api: CupboardCreate) -> Self {
        Self {
            resource_id,
            cupboard_number: api.cupboard_number.trim().to_string(),
            shelf_count: api.shelf_count,
            contents_description: api.contents_description.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CupboardUpdateDBRequest {
    pub cupboard_number: Option<String>,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
}

impl From<CupboardUpdate> for CupboardUpdateDBRequest {
    fn from(api: CupboardUpdate) -> Self {
        Self {
            cupboard_number: api.cupboard_number.map(|s| s.trim().to_string()),
            shelf_count: api.shelf_count,
            contents_description: api.contents_description,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CupboardDBResponse {
    pub id: CupboardId,
    pub resource_id: ResourceId,
    pub cupboard_number: String,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
