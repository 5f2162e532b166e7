//! Database models for buildings.

use crate::api::models::buildings::{BuildingCreate, BuildingUpdate};
use crate::types::BuildingId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct BuildingCreateDBRequest {
    pub building_name: String,
    pub building_number: String,
    pub total_floors: i32,
}

impl From<BuildingCreate> for BuildingCreateDBRequest {
    fn from(api: BuildingCreate) -> Self {
        Self {
            building_name: api.building_name.trim().to_string(),
            building_number: api.building_number.trim().to_string(),
            total_floors: api.total_floors,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuildingUpdateDBRequest {
    pub building_name: Option<String>,
    pub building_number: Option<String>,
    pub total_floors: Option<i32>,
}

impl From<BuildingUpdate> for BuildingUpdateDBRequest {
    fn from(api: BuildingUpdate) -> Self {
        Self {
            building_name: api.building_name.map(|s| s.trim().to_string()),
            building_number: api.building_number.map(|s| s.trim().to_string()),
            total_floors: api.total_floors,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BuildingDBResponse {
    pub id: BuildingId,
    pub building_name: String,
    pub building_number: String,
    pub total_floors: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
