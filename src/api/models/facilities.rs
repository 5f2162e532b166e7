//! API request/response models for facilities.

use crate::db::models::facilities::FacilityDBResponse;
use crate::types::{FacilityId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityCreate {
    pub facility_name: String,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FacilityUpdate {
    pub facility_name: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacilityResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: FacilityId,
    #[schema(value_type = String, format = "uuid")]
    pub resource_id: ResourceId,
    pub facility_name: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FacilityDBResponse> for FacilityResponse {
    fn from(db: FacilityDBResponse) -> Self {
        Self {
            id: db.id,
            resource_id: db.resource_id,
            facility_name: db.facility_name,
            details: db.details,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
