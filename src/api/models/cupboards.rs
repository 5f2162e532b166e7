//! API request/response models for cupboards.

use crate::db::models::cupboards::CupboardDBResponse;
use crate::types::{CupboardId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CupboardCreate {
    pub cupboard_number: String,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CupboardUpdate {
    pub cupboard_number: Option<String>,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CupboardResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: CupboardId,
    #[schema(value_type = String, format = "uuid")]
    pub resource_id: ResourceId,
    pub cupboard_number: String,
    pub shelf_count: Option<i32>,
    pub contents_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CupboardDBResponse> for CupboardResponse {
    fn from(db: CupboardDBResponse) -> Self {
        Self {
            id: db.id,
            resource_id: db.resource_id,
            cupboard_number: db.cupboard_number,
            shelf_count: db.shelf_count,
            contents_description: db.contents_description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
