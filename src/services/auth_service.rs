//! Registration and login against the credential store.

use std::time::SystemTime;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use uuid::Uuid;

use crate::{
    dao::models::UserEntity,
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::ServiceError,
    services::token_service,
    state::SharedState,
};

/// Message returned for both unknown e-mail and wrong password, so login
/// responses cannot be used to enumerate registered accounts.
const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Create a new account and issue its first session token.
///
/// Username and e-mail uniqueness is checked by exact, case-sensitive match
/// against the stored collection.
pub async fn register(
    state: &SharedState,
    request: RegisterRequest,
) -> Result<AuthResponse, ServiceError> {
    let store = state.require_document_store().await?;
    let mut users = store.read_users().await?;

    if users.iter().any(|user| user.username == request.username) {
        return Err(ServiceError::Conflict("username already taken".into()));
    }
    if users.iter().any(|user| user.email == request.email) {
        return Err(ServiceError::Conflict("email already registered".into()));
    }

    let user = UserEntity {
        id: Uuid::new_v4(),
        username: request.username,
        email: request.email,
        password_hash: hash_password(&request.password)?,
        favorites: Vec::new(),
        created_at: SystemTime::now(),
    };

    users.push(user.clone());
    store.write_users(users).await?;

    let config = state.config();
    let token = token_service::issue(&config.token_secret, config.token_ttl_days, &user)?;

    Ok(AuthResponse {
        user: user.into(),
        token,
    })
}

/// Verify credentials and issue a fresh session token.
pub async fn login(
    state: &SharedState,
    request: LoginRequest,
) -> Result<AuthResponse, ServiceError> {
    let store = state.require_document_store().await?;
    let users = store.read_users().await?;

    let user = users
        .into_iter()
        .find(|user| user.email == request.email)
        .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let config = state.config();
    let token = token_service::issue(&config.token_secret, config.token_ttl_days, &user)?;

    Ok(AuthResponse {
        user: user.into(),
        token,
    })
}

/// Hash a password with Argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::InvalidInput(format!("failed to hash password: {err}")))
}

/// Verify a password against a stored hash. Never plain equality.
fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{config::AppConfig, dao::document_store::memory::MemoryStore};

    async fn test_state() -> SharedState {
        let state = crate::state::AppState::new(AppConfig::default());
        state.set_document_store(Arc::new(MemoryStore::new())).await;
        state
    }

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: "hunter2-is-fine".into(),
        }
    }

    #[tokio::test]
    async fn register_returns_token_accepted_by_verify() {
        let state = test_state().await;
        let response = register(&state, register_request("taras", "taras@example.com"))
            .await
            .unwrap();

        assert!(response.user.favorites.is_empty());
        let identity =
            token_service::verify(&state.config().token_secret, &response.token).unwrap();
        assert_eq!(identity.user_id, response.user.id);
    }

    #[tokio::test]
    async fn duplicate_username_and_email_conflict() {
        let state = test_state().await;
        register(&state, register_request("taras", "taras@example.com"))
            .await
            .unwrap();

        let same_username = register(&state, register_request("taras", "other@example.com")).await;
        assert!(matches!(same_username, Err(ServiceError::Conflict(_))));

        let same_email = register(&state, register_request("olena", "taras@example.com")).await;
        assert!(matches!(same_email, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn username_uniqueness_is_case_sensitive() {
        let state = test_state().await;
        register(&state, register_request("taras", "taras@example.com"))
            .await
            .unwrap();

        // `Taras` is a different username than `taras` in this design.
        register(&state, register_request("Taras", "taras2@example.com"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn login_roundtrip_succeeds() {
        let state = test_state().await;
        register(&state, register_request("taras", "taras@example.com"))
            .await
            .unwrap();

        let response = login(
            &state,
            LoginRequest {
                email: "taras@example.com".into(),
                password: "hunter2-is-fine".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(response.user.username, "taras");
    }

    #[tokio::test]
    async fn login_failures_share_one_message() {
        let state = test_state().await;
        register(&state, register_request("taras", "taras@example.com"))
            .await
            .unwrap();

        let unknown_email = login(
            &state,
            LoginRequest {
                email: "nobody@example.com".into(),
                password: "hunter2-is-fine".into(),
            },
        )
        .await
        .unwrap_err();
        let wrong_password = login(
            &state,
            LoginRequest {
                email: "taras@example.com".into(),
                password: "wrong".into(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(unknown_email.to_string(), wrong_password.to_string());
    }

    #[test]
    fn password_hash_is_salted_and_verifiable() {
        let first = hash_password("secret-password").unwrap();
        let second = hash_password("secret-password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("secret-password", &first));
        assert!(!verify_password("other-password", &first));
        assert!(!verify_password("secret-password", "not-a-hash"));
    }
}
