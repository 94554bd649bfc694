//! Stateless session tokens: signed JWTs carrying the user identity.
//!
//! Tokens are never persisted server-side. Validity is determined purely by
//! the signature and the expiry claim; there is no revocation list.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{dao::models::UserEntity, error::ServiceError};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token was issued for.
    pub sub: Uuid,
    /// Username at issue time.
    pub username: String,
    /// E-mail at issue time.
    pub email: String,
    /// Issue timestamp, seconds since the Unix epoch.
    pub iat: u64,
    /// Expiry timestamp, seconds since the Unix epoch.
    pub exp: u64,
}

/// Authenticated identity extracted from a verified token.
///
/// The carried identity is trusted without a credential-store round-trip;
/// this is the stateless trust model the whole auth design rests on.
#[derive(Debug, Clone)]
pub struct Identity {
    /// User id carried by the token.
    pub user_id: Uuid,
    /// Username carried by the token.
    pub username: String,
    /// E-mail carried by the token.
    pub email: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
            email: claims.email,
        }
    }
}

/// Issue a fresh token for `user`, valid for `ttl_days` from now.
pub fn issue(secret: &str, ttl_days: u64, user: &UserEntity) -> Result<String, ServiceError> {
    let issued_at = unix_now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        iat: issued_at,
        exp: issued_at + ttl_days * SECONDS_PER_DAY,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ServiceError::Unauthorized(format!("failed to sign token: {err}")))
}

/// Verify signature and expiry, returning the carried identity.
pub fn verify(secret: &str, token: &str) -> Result<Identity, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims.into())
    .map_err(|_| ServiceError::Unauthorized("invalid or expired token".into()))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    const SECRET: &str = "test-secret";

    fn sample_user() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "taras".into(),
            email: "taras@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            favorites: Vec::new(),
            created_at: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn issued_token_verifies_and_carries_identity() {
        let user = sample_user();
        let token = issue(SECRET, 7, &user).unwrap();

        let identity = verify(SECRET, &token).unwrap();
        assert_eq!(identity.user_id, user.id);
        assert_eq!(identity.username, user.username);
        assert_eq!(identity.email, user.email);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue("other-secret", 7, &sample_user()).unwrap();
        assert!(verify(SECRET, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = sample_user();
        let issued_at = unix_now() - 10 * SECONDS_PER_DAY;
        let claims = Claims {
            sub: user.id,
            username: user.username,
            email: user.email,
            iat: issued_at,
            exp: issued_at + 7 * SECONDS_PER_DAY,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify(SECRET, &token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify(SECRET, "not-a-token").is_err());
    }
}
