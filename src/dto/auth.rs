use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{dao::models::UserEntity, dto::validation::validate_username};

/// Payload used to create a new account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    /// Unique display name (case-sensitive).
    #[validate(custom(function = validate_username))]
    pub username: String,
    /// Unique e-mail address used as the login identifier.
    #[validate(email)]
    pub email: String,
    /// Plaintext password; only its hash is ever persisted.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Payload used to log into an existing account.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    /// E-mail the account was registered with.
    #[validate(email)]
    pub email: String,
    /// Plaintext password to verify.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Public projection of a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Display name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Favorited game ids, in insertion order.
    pub favorites: Vec<Uuid>,
}

impl From<UserEntity> for UserProfile {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            favorites: entity.favorites,
        }
    }
}

/// Response returned by both registration and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Public profile of the authenticated user.
    pub user: UserProfile,
    /// Signed session token to present as `Authorization: Bearer <token>`.
    pub token: String,
}
