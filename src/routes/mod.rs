use axum::Router;

use crate::state::SharedState;

/// Registration and login endpoints.
pub mod auth;
/// Swagger UI and OpenAPI document.
pub mod docs;
/// Catalog, random selection, and like/unlike endpoints.
pub mod games;
/// Health check endpoint.
pub mod health;
/// Bearer-token identity extractor.
pub mod identity;
/// Per-user favorites endpoints.
pub mod users;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(auth::router())
        .merge(games::router())
        .merge(users::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
