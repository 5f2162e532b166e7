//! HTTP request handlers for all API endpoints.
//!
//! Each handler is responsible for request validation, authorization checks,
//! business logic via the database repositories, and response serialization.
//!
//! - [`auth`]: registration, login, logout and current user info
//! - [`bookings`]: booking creation, conflict detection and the approval workflow
//! - [`buildings`], [`resource_types`], [`resources`]: inventory management
//! - [`facilities`], [`cupboards`]: per-resource equipment and storage
//! - [`maintenance`]: maintenance scheduling, admin only
//!
//! Handlers return [`crate::errors::Error`] which converts to the appropriate
//! HTTP status code and JSON error body.

use crate::{
    api::models::users::CurrentUser,
    errors::Error,
    types::{Entity, Operation, Permission},
};

pub mod auth;
pub mod bookings;
pub mod buildings;
pub mod cupboards;
pub mod facilities;
pub mod maintenance;
pub mod resource_types;
pub mod resources;

/// Reject non-admin callers with a 403 describing the attempted operation.
pub(crate) fn require_admin(current_user: &CurrentUser, entity: Entity, operation: Operation) -> Result<(), Error> {
    if current_user.is_admin() {
        return Ok(());
    }

    Err(Error::InsufficientPermissions {
        required: Permission::Allow(entity, operation),
        action: operation,
        resource: format!("{entity:?}").to_lowercase(),
    })
}
