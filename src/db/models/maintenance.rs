//! Database models for maintenance schedules.

use crate::api::models::maintenance::{MaintenanceCreate, MaintenanceStatus, MaintenanceUpdate};
use crate::types::{MaintenanceId, ResourceId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct MaintenanceCreateDBRequest {
    pub resource_id: ResourceId,
    pub maintenance_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub notes: Option<String>,
}

impl From<MaintenanceCreate> for MaintenanceCreateDBRequest {
    fn from(api: MaintenanceCreate) -> Self {
        Self {
            resource_id: api.resource_id,
            maintenance_type: api.maintenance_type.trim().to_string(),
            scheduled_date: api.scheduled_date,
            notes: api.notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

/// Filter for listing maintenance schedules.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    pub status: Option<MaintenanceStatus>,
    pub resource_id: Option<ResourceId>,
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceUpdateDBRequest {
    pub maintenance_type: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub status: Option<MaintenanceStatus>,
    pub notes: Option<String>,
}

impl From<MaintenanceUpdate> for MaintenanceUpdateDBRequest {
    fn from(api: MaintenanceUpdate) -> Self {
        Self {
            maintenance_type: api.maintenance_type.map(|s| s.trim().to_string()),
            scheduled_date: api.scheduled_date,
            status: api.status,
            notes: api.notes,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MaintenanceDBResponse {
    pub id: MaintenanceId,
    pub resource_id: ResourceId,
    pub maintenance_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub status: MaintenanceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
