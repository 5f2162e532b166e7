//! Database record structures matching table schemas.
//!
//! Each entity has three shapes: a `*CreateDBRequest` for inserts, a
//! `*UpdateDBRequest` with optional fields for partial updates, and a
//! `*DBResponse` mirroring the table row. Conversions from the API models
//! live here so handlers never hand raw request bodies to the repositories.

pub mod bookings;
pub mod buildings;
pub mod cupboards;
pub mod facilities;
pub mod maintenance;
pub mod resource_types;
pub mod resources;
pub mod users;
