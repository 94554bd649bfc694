use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    dto::{
        auth::AuthResponse,
        favorites::{FavoriteGamesResponse, FavoriteIdsResponse},
        game::{GameInput, GameSummary},
    },
    services::randomizer_service::GameFilter,
};

/// Services provide no timeout of their own, so the client imposes one.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures surfaced by [`ApiClient`] calls, mirroring the server taxonomy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A protected call was made without logging in first.
    #[error("not authenticated")]
    NotAuthenticated,
    /// Server rejected the input (400).
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Bad credentials or an invalid/expired token (401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Entity absent or empty candidate set (404).
    #[error("not found: {0}")]
    NotFound(String),
    /// Duplicate registration or already-favorite (409). Non-fatal.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Any other status, including 5xx.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code returned.
        status: u16,
        /// Message body, when one could be decoded.
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Typed HTTP client for the backend, holding the session token.
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client for the backend at `base_url` (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    /// Install a session token, e.g. one restored from durable storage.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Discard the session token (client-side logout).
    pub fn clear_token(&self) {
        self.token.write().expect("token lock poisoned").take();
    }

    /// Current session token, for persisting across reloads.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Build a request carrying the bearer token, failing when logged out.
    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token().ok_or(ApiError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Create an account and remember the returned token.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let response = self
            .request(Method::POST, "/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let auth: AuthResponse = decode(response).await?;
        self.set_token(&auth.token);
        Ok(auth)
    }

    /// Log in and remember the returned token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response = self
            .request(Method::POST, "/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let auth: AuthResponse = decode(response).await?;
        self.set_token(&auth.token);
        Ok(auth)
    }

    /// Fetch the full catalog.
    pub async fn list_games(&self) -> Result<Vec<GameSummary>, ApiError> {
        let response = self.request(Method::GET, "/games").send().await?;
        decode(response).await
    }

    /// Fetch a random game matching `filter`.
    pub async fn random(&self, filter: &GameFilter) -> Result<GameSummary, ApiError> {
        let mut query = Vec::new();
        if let Some(genre) = &filter.genre {
            query.push(("genre", genre.clone()));
        }
        if let Some(platform) = &filter.platform {
            query.push(("platform", platform.clone()));
        }
        if let Some(mode) = &filter.mode {
            query.push(("mode", mode.clone()));
        }

        let response = self
            .request(Method::GET, "/random")
            .query(&query)
            .send()
            .await?;
        decode(response).await
    }

    /// Append a game to the catalog. Requires authentication.
    pub async fn append_game(&self, input: &GameInput) -> Result<GameSummary, ApiError> {
        let response = self
            .authed(Method::POST, "/games")?
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    /// Favorite a game, returning the updated id list.
    pub async fn like(&self, game_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let response = self
            .authed(Method::POST, &format!("/games/{game_id}/like"))?
            .send()
            .await?;
        let body: FavoriteIdsResponse = decode(response).await?;
        Ok(body.favorites)
    }

    /// Unfavorite a game, returning the updated id list. Idempotent.
    pub async fn unlike(&self, game_id: Uuid) -> Result<Vec<Uuid>, ApiError> {
        let response = self
            .authed(Method::DELETE, &format!("/games/{game_id}/like"))?
            .send()
            .await?;
        let body: FavoriteIdsResponse = decode(response).await?;
        Ok(body.favorites)
    }

    /// Fetch a user's favorites resolved to full games.
    pub async fn favorites(&self, user_id: Uuid) -> Result<Vec<GameSummary>, ApiError> {
        let response = self
            .authed(Method::GET, &format!("/users/{user_id}/favorites"))?
            .send()
            .await?;
        let body: FavoriteGamesResponse = decode(response).await?;
        Ok(body.favorites)
    }
}

/// Decode a success body or map the error status onto the taxonomy.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        other => ApiError::Server {
            status: other.as_u16(),
            message,
        },
    })
}
