//! API request/response models for maintenance schedules.

use crate::db::models::maintenance::MaintenanceDBResponse;
use crate::types::{MaintenanceId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "maintenance_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceCreate {
    #[schema(value_type = String, format = "uuid")]
    pub resource_id: ResourceId,
    pub maintenance_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceUpdate {
    pub maintenance_type: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: Option<MaintenanceStatus>,
    pub notes: Option<String>,
}

/// Query parameters for listing maintenance schedules
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListMaintenanceQuery {
    pub status: Option<MaintenanceStatus>,

    #[param(value_type = Option<String>, format = "uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaintenanceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: MaintenanceId,
    #[schema(value_type = String, format = "uuid")]
    pub resource_id: ResourceId,
    pub maintenance_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MaintenanceDBResponse> for MaintenanceResponse {
    fn from(db: MaintenanceDBResponse) -> Self {
        Self {
            id: db.id,
            resource_id: db.resource_id,
            maintenance_type: db.maintenance_type,
            scheduled_date: db.scheduled_date,
            status: db.status,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
