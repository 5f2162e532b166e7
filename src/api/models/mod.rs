//! Request/response data structures for API communication.

pub mod auth;
pub mod bookings;
pub mod buildings;
pub mod cupboards;
pub mod facilities;
pub mod maintenance;
pub mod resource_types;
pub mod resources;
pub mod users;
