//! Database models for users.

use crate::api::models::users::{Role, UserRegister};
use crate::types::UserId;
use chrono::{DateTime, Utc};

/// Database request for creating a new user
#[derive(Debug, Clone)]
pub struct UserCreateDBRequest {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: Role,
}

impl UserCreateDBRequest {
    /// Build a create request from a registration, with the password already hashed.
    pub fn from_registration(api: UserRegister, password_hash: String) -> Self {
        Self {
            name: api.name,
            email: api.email,
            password_hash: Some(password_hash),
            role: api.role,
        }
    }
}

/// Database request for updating a user
#[derive(Debug, Clone, Default)]
pub struct UserUpdateDBRequest {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Database response for a user
#[derive(Debug, Clone)]
pub struct UserDBResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub password_hash: Option<String>,
}
