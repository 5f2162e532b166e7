//! Common type definitions and permission system types.
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety.
//! The permission types combine an [`Entity`] (what is being accessed) with an
//! [`Operation`] (what is being done to it) and are used when reporting
//! authorization failures.

use std::fmt;
use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type BuildingId = Uuid;
pub type ResourceTypeId = Uuid;
pub type ResourceId = Uuid;
pub type FacilityId = Uuid;
pub type CupboardId = Uuid;
pub type MaintenanceId = Uuid;
pub type BookingId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

// Operations that can be performed on resources
// *-All means unrestricted access, *-Own means restricted to own entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAll,
    CreateOwn,
    ReadAll,
    ReadOwn,
    UpdateAll,
    UpdateOwn,
    DeleteAll,
    DeleteOwn,
}

// Entity kinds that can be operated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Users,
    Buildings,
    ResourceTypes,
    Resources,
    Facilities,
    Cupboards,
    Maintenance,
    Bookings,
}

// Permission requirement reported on authorization failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    /// Simple permission: (Entity, Operation)
    Allow(Entity, Operation),
    /// User must own the specific entity instance
    Owner,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::CreateAll | Operation::CreateOwn => write!(f, "Create"),
            Operation::ReadAll | Operation::ReadOwn => write!(f, "Read"),
            Operation::UpdateAll | Operation::UpdateOwn => write!(f, "Update"),
            Operation::DeleteAll | Operation::DeleteOwn => write!(f, "Delete"),
        }
    }
}
