use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_valid::Valid;

use crate::{
    dto::auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    services::auth_service,
    state::SharedState,
};

/// Registration and login routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 409, description = "Username or email already taken")
    )
)]
/// Create an account and return its first session token.
pub async fn register(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let response = auth_service::register(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Missing or malformed field"),
        (status = 401, description = "Invalid email or password")
    )
)]
/// Verify credentials and return a fresh session token.
pub async fn login(
    State(state): State<SharedState>,
    Valid(Json(payload)): Valid<Json<LoginRequest>>,
) -> Result<Json<AuthResponse>, AppError> {
    let response = auth_service::login(&state, payload).await?;
    Ok(Json(response))
}
