//! Repository implementations, one per table.

pub mod bookings;
pub mod buildings;
pub mod cupboards;
pub mod facilities;
pub mod maintenance;
pub mod repository;
pub mod resource_types;
pub mod resources;
pub mod users;

pub use bookings::Bookings;
pub use buildings::Buildings;
pub use cupboards::Cupboards;
pub use facilities::Facilities;
pub use maintenance::MaintenanceSchedules;
pub use repository::Repository;
pub use resource_types::ResourceTypes;
pub use resources::Resources;
pub use users::Users;
