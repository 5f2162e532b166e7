//! OpenAPI documentation for the booking API.
//!
//! The generated document is served interactively at `/docs` via Scalar.

use utoipa::OpenApi;

use crate::api::{self, models};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "resctl API",
        description = "Role-based resource booking: inventory management, booking requests with conflict detection, and an admin approval workflow.",
    ),
    paths(
        // Authentication
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::auth::me,
        // Bookings
        api::handlers::bookings::list_bookings,
        api::handlers::bookings::create_booking,
        api::handlers::bookings::get_booking,
        api::handlers::bookings::approve_booking,
        api::handlers::bookings::reject_booking,
        api::handlers::bookings::cancel_booking,
        api::handlers::bookings::delete_booking,
        // Buildings
        api::handlers::buildings::list_buildings,
        api::handlers::buildings::create_building,
        api::handlers::buildings::get_building,
        api::handlers::buildings::update_building,
        api::handlers::buildings::delete_building,
        // Resource types
        api::handlers::resource_types::list_resource_types,
        api::handlers::resource_types::create_resource_type,
        api::handlers::resource_types::get_resource_type,
        api::handlers::resource_types::update_resource_type,
        api::handlers::resource_types::delete_resource_type,
        // Resources
        api::handlers::resources::list_resources,
        api::handlers::resources::create_resource,
        api::handlers::resources::get_resource,
        api::handlers::resources::update_resource,
        api::handlers::resources::delete_resource,
        // Facilities and cupboards
        api::handlers::facilities::list_facilities,
        api::handlers::facilities::create_facility,
        api::handlers::facilities::update_facility,
        api::handlers::facilities::delete_facility,
        api::handlers::cupboards::list_cupboards,
        api::handlers::cupboards::create_cupboard,
        api::handlers::cupboards::update_cupboard,
        api::handlers::cupboards::delete_cupboard,
        // Maintenance
        api::handlers::maintenance::list_maintenance,
        api::handlers::maintenance::create_maintenance,
        api::handlers::maintenance::get_maintenance,
        api::handlers::maintenance::update_maintenance,
        api::handlers::maintenance::delete_maintenance,
    ),
    components(schemas(
        models::auth::LoginRequest,
        models::auth::AuthResponse,
        models::auth::AuthSuccessResponse,
        models::users::UserRegister,
        models::users::UserResponse,
        models::users::Role,
        models::bookings::BookingCreate,
        models::bookings::BookingResponse,
        models::bookings::BookingStatus,
        models::buildings::BuildingCreate,
        models::buildings::BuildingUpdate,
        models::buildings::BuildingResponse,
        models::resource_types::ResourceTypeCreate,
        models::resource_types::ResourceTypeUpdate,
        models::resource_types::ResourceTypeResponse,
        models::resources::ResourceCreate,
        models::resources::ResourceUpdate,
        models::resources::ResourceResponse,
        models::facilities::FacilityCreate,
        models::facilities::FacilityUpdate,
        models::facilities::FacilityResponse,
        models::cupboards::CupboardCreate,
        models::cupboards::CupboardUpdate,
        models::cupboards::CupboardResponse,
        models::maintenance::MaintenanceCreate,
        models::maintenance::MaintenanceUpdate,
        models::maintenance::MaintenanceResponse,
        models::maintenance::MaintenanceStatus,
    )),
    tags(
        (name = "authentication", description = "Registration, login and session info"),
        (name = "bookings", description = "Booking requests and the approval workflow"),
        (name = "inventory", description = "Buildings, resource types, resources, facilities and cupboards"),
        (name = "maintenance", description = "Maintenance scheduling (admin only)"),
    )
)]
pub struct ApiDoc;
