//! Role-based resource booking service.
//!
//! resctl manages a bookable inventory (buildings, typed resources, their
//! facilities and cupboards) and the bookings made against it. Students and
//! employees request time slots on a resource; admins approve or reject
//! pending requests, manage the inventory and schedule maintenance.
//!
//! # Architecture
//!
//! The HTTP layer is built on [Axum](https://github.com/tokio-rs/axum). The
//! **API layer** ([`api`]) holds the request handlers and wire models, the
//! **authentication layer** ([`auth`]) issues and verifies JWT session tokens
//! (sent as a cookie or bearer header), and the **database layer** ([`db`])
//! uses the repository pattern over PostgreSQL via sqlx.
//!
//! Booking conflict detection treats a booking as the half-open interval
//! `[start_time, end_time)`: two bookings on the same resource conflict when
//! their intervals overlap and both are in an active status (`PENDING` or
//! `APPROVED`). Back-to-back bookings sharing an endpoint do not conflict.
//!
//! The interactive API reference is served at `/docs`.

use axum::{
    http::HeaderValue,
    routing::{delete, get, patch, post},
    Router,
};
use bon::Builder;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, instrument, warn, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod openapi;
pub mod telemetry;
#[cfg(test)]
pub mod test_utils;
pub mod types;

pub use config::Config;
pub use errors::Error;

use crate::api::models::users::Role;
use crate::auth::password;
use crate::db::handlers::Users;
use crate::db::models::users::{UserCreateDBRequest, UserUpdateDBRequest};
use crate::openapi::ApiDoc;
use crate::types::UserId;

/// Shared application state available to all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// Idempotent: creates the admin on first startup, updates the password on
/// later startups when one is configured. Registration never produces admin
/// accounts, so this is the only way the first admin comes into existence.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &PgPool) -> anyhow::Result<UserId> {
    let password_hash = password.map(password::hash_string).transpose()?;

    let mut tx = db.begin().await?;
    let mut users = Users::new(&mut tx);

    if let Some(existing) = users.get_user_by_email(email).await? {
        if password_hash.is_some() {
            users
                .update(
                    existing.id,
                    &UserUpdateDBRequest {
                        name: None,
                        password_hash,
                    },
                )
                .await?;
        }
        tx.commit().await?;
        return Ok(existing.id);
    }

    let created = users
        .create(&UserCreateDBRequest {
            name: "Administrator".to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Admin,
        })
        .await?;

    tx.commit().await?;
    info!(email, "Created initial admin user");
    Ok(created.id)
}

/// Create CORS layer from configuration. Origins that fail to parse are
/// skipped with a warning rather than aborting startup.
fn create_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .auth
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.cors.allow_credentials)
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PATCH,
            axum::http::Method::DELETE,
        ])
}

/// Build the application router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    // Authentication routes live at the root so they can be masked when the
    // service is deployed behind an SSO proxy.
    let auth_routes = Router::new()
        .route("/authentication/register", post(api::handlers::auth::register))
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .route("/authentication/me", get(api::handlers::auth::me));

    let api_routes = Router::new()
        // Bookings
        .route("/bookings", get(api::handlers::bookings::list_bookings))
        .route("/bookings", post(api::handlers::bookings::create_booking))
        .route("/bookings/{id}", get(api::handlers::bookings::get_booking))
        .route("/bookings/{id}", delete(api::handlers::bookings::delete_booking))
        .route("/bookings/{id}/approve", post(api::handlers::bookings::approve_booking))
        .route("/bookings/{id}/reject", post(api::handlers::bookings::reject_booking))
        .route("/bookings/{id}/cancel", post(api::handlers::bookings::cancel_booking))
        // Buildings
        .route("/buildings", get(api::handlers::buildings::list_buildings))
        .route("/buildings", post(api::handlers::buildings::create_building))
        .route("/buildings/{id}", get(api::handlers::buildings::get_building))
        .route("/buildings/{id}", patch(api::handlers::buildings::update_building))
        .route("/buildings/{id}", delete(api::handlers::buildings::delete_building))
        // Resource types
        .route("/resource-types", get(api::handlers::resource_types::list_resource_types))
        .route("/resource-types", post(api::handlers::resource_types::create_resource_type))
        .route("/resource-types/{id}", get(api::handlers::resource_types::get_resource_type))
        .route("/resource-types/{id}", patch(api::handlers::resource_types::update_resource_type))
        .route("/resource-types/{id}", delete(api::handlers::resource_types::delete_resource_type))
        // Resources
        .route("/resources", get(api::handlers::resources::list_resources))
        .route("/resources", post(api::handlers::resources::create_resource))
        .route("/resources/{id}", get(api::handlers::resources::get_resource))
        .route("/resources/{id}", patch(api::handlers::resources::update_resource))
        .route("/resources/{id}", delete(api::handlers::resources::delete_resource))
        // Facilities and cupboards, nested under their resource for list/create
        .route("/resources/{resource_id}/facilities", get(api::handlers::facilities::list_facilities))
        .route("/resources/{resource_id}/facilities", post(api::handlers::facilities::create_facility))
        .route("/facilities/{id}", patch(api::handlers::facilities::update_facility))
        .route("/facilities/{id}", delete(api::handlers::facilities::delete_facility))
        .route("/resources/{resource_id}/cupboards", get(api::handlers::cupboards::list_cupboards))
        .route("/resources/{resource_id}/cupboards", post(api::handlers::cupboards::create_cupboard))
        .route("/cupboards/{id}", patch(api::handlers::cupboards::update_cupboard))
        .route("/cupboards/{id}", delete(api::handlers::cupboards::delete_cupboard))
        // Maintenance
        .route("/maintenance", get(api::handlers::maintenance::list_maintenance))
        .route("/maintenance", post(api::handlers::maintenance::create_maintenance))
        .route("/maintenance/{id}", get(api::handlers::maintenance::get_maintenance))
        .route("/maintenance/{id}", patch(api::handlers::maintenance::update_maintenance))
        .route("/maintenance/{id}", delete(api::handlers::maintenance::delete_maintenance));

    let cors_layer = create_cors_layer(&state.config);

    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns the router, config and database pool.
///
/// [`Application::new`] connects to the database, runs migrations and ensures
/// the initial admin user exists; [`Application::serve`] binds the configured
/// address and runs until the shutdown future resolves.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not configured"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool.max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.pool.acquire_timeout_secs))
            .connect(database_url)
            .await?;

        migrator().run(&pool).await?;

        create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool).await?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(state);

        Ok(Self { router, config, pool })
    }

    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Listening on http://{bind_addr}");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_config, test_server};
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_healthz(pool: PgPool) {
        let server = test_server(pool, create_test_config());
        let response = server.get("/healthz").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_initial_admin_user_is_idempotent(pool: PgPool) {
        let first = create_initial_admin_user("root@example.com", Some("initial-password"), &pool)
            .await
            .unwrap();
        let second = create_initial_admin_user("root@example.com", Some("rotated-password"), &pool)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_api_requires_authentication(pool: PgPool) {
        let server = test_server(pool, create_test_config());
        server.get("/api/v1/bookings").await.assert_status_unauthorized();
        server.get("/api/v1/resources").await.assert_status_unauthorized();
    }
}
