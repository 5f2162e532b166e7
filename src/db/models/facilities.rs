//! Database models for facilities attached to a resource.

use crate::api::models::facilities::{FacilityCreate, FacilityUpdate};
use crate::types::{FacilityId, ResourceId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct FacilityCreateDBRequest {
    pub resource_id: ResourceId,
    pub facility_name: String,
    pub details: Option<String>,
}

impl FacilityCreateDBRequest {
    pub fn new(resource_id: ResourceId, api: FacilityCreate) -> Self {
        Self {
            resource_id,
            facility_name: api.facility_name.trim().to_string(),
            details: api.details.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacilityUpdateDBRequest {
    pub facility_name: Option<String>,
    pub details: Option<String>,
}

impl From<FacilityUpdate> for FacilityUpdateDBRequest {
    fn from(api: FacilityUpdate) -> Self {
        Self {
            facility_name: api.facility_name.map(|s| s.trim().to_string()),
            details: api.details,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FacilityDBResponse {
    pub id: FacilityId,
    pub resource_id: ResourceId,
    pub facility_name: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
