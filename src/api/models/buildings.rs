//! API request/response models for buildings.

use crate::db::models::buildings::BuildingDBResponse;
use crate::types::BuildingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuildingCreate {
    pub building_name: String,
    pub building_number: String,
    /// Floors are numbered 0..=total_floors; must be at least 1
    pub total_floors: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BuildingUpdate {
    pub building_name: Option<String>,
    pub building_number: Option<String>,
    pub total_floors: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuildingResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BuildingId,
    pub building_name: String,
    pub building_number: String,
    pub total_floors: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BuildingDBResponse> for BuildingResponse {
    fn from(db: BuildingDBResponse) -> Self {
        Self {
            id: db.id,
            building_name: db.building_name,
            building_number: db.building_number,
            total_floors: db.total_floors,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
