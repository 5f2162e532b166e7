//! Shared helpers for handler and repository tests.

use crate::api::models::users::Role;
use crate::auth::password::{hash_string_with_params, Argon2Params};
use crate::config::{Config, PasswordConfig};
use crate::db::handlers::{Buildings, Repository, ResourceTypes, Resources, Users};
use crate::db::models::{
    buildings::BuildingCreateDBRequest, resource_types::ResourceTypeCreateDBRequest,
    resources::ResourceCreateDBRequest, users::UserCreateDBRequest,
};
use crate::types::ResourceId;
use crate::AppState;
use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Fast Argon2 parameters; production hardness is pointless in tests.
fn test_argon2_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_email: "admin@test.com".to_string(),
        admin_password: None,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        auth: crate::config::AuthConfig {
            password: PasswordConfig {
                argon2_memory_kib: 1024,
                argon2_iterations: 1,
                argon2_parallelism: 1,
                ..Default::default()
            },
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn test_server(pool: PgPool, config: Config) -> TestServer {
    let state = AppState::builder().db(pool).config(config).build();
    let router = crate::build_router(state);
    TestServer::new(router).expect("Failed to create test server")
}

/// Register a user through the API and return their session token.
pub async fn register_user(server: &TestServer, email: &str, role: &str) -> String {
    let response = server
        .post("/authentication/register")
        .json(&serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": TEST_PASSWORD,
            "role": role,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.cookie("token").value().to_string()
}

/// Credentials of an admin seeded directly in the database.
pub struct TestAdmin {
    pub email: String,
    pub password: String,
}

/// Insert an admin account; registration only accepts non-admin roles.
pub async fn seed_admin(pool: &PgPool) -> TestAdmin {
    let password_hash =
        hash_string_with_params(TEST_PASSWORD, Some(test_argon2_params())).expect("Failed to hash test password");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let email = format!("admin-{}@example.com", Uuid::new_v4().simple());

    Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            name: "Test Admin".to_string(),
            email: email.clone(),
            password_hash: Some(password_hash),
            role: Role::Admin,
        })
        .await
        .expect("Failed to create test admin");

    TestAdmin {
        email,
        password: TEST_PASSWORD.to_string(),
    }
}

/// Log in through the API and return the session token.
pub async fn login_as(server: &TestServer, admin: &TestAdmin) -> String {
    let response = server
        .post("/authentication/login")
        .json(&serde_json::json!({"email": admin.email, "password": admin.password}))
        .await;
    response.assert_status_ok();
    response.cookie("token").value().to_string()
}

/// Seed a resource type, building and resource, returning the resource id.
pub async fn seed_resource(conn: &mut PgConnection) -> ResourceId {
    let resource_type = ResourceTypes::new(conn)
        .create(&ResourceTypeCreateDBRequest {
            type_name: format!("Room Type {}", Uuid::new_v4().simple()),
        })
        .await
        .expect("Failed to create test resource type");

    let building = Buildings::new(conn)
        .create(&BuildingCreateDBRequest {
            building_name: "Test Building".to_string(),
            building_number: "T-1".to_string(),
            total_floors: 5,
        })
        .await
        .expect("Failed to create test building");

    Resources::new(conn)
        .create(&ResourceCreateDBRequest {
            resource_name: format!("Room {}", Uuid::new_v4().simple()),
            resource_type_id: resource_type.id,
            building_id: building.id,
            floor_number: 1,
            description: None,
        })
        .await
        .expect("Failed to create test resource")
        .id
}

pub async fn seed_resource_via_pool(pool: &PgPool) -> ResourceId {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    seed_resource(&mut conn).await
}
