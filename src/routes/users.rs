use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::favorites::FavoriteGamesResponse,
    error::AppError,
    routes::identity::Identity,
    services::favorites_service,
    state::SharedState,
};

/// Per-user favorites listing routes.
pub fn router() -> Router<SharedState> {
    Router::new().route("/users/{id}/favorites", get(list_favorites))
}

#[utoipa::path(
    get,
    path = "/users/{id}/favorites",
    tag = "favorites",
    params(("id" = Uuid, Path, description = "User whose favorites to list")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Resolved favorite games", body = FavoriteGamesResponse),
        (status = 404, description = "User not found")
    )
)]
/// Resolve a user's favorites against the catalog.
pub async fn list_favorites(
    State(state): State<SharedState>,
    _identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteGamesResponse>, AppError> {
    let favorites = favorites_service::list_favorites(&state, id).await?;
    Ok(Json(FavoriteGamesResponse { favorites }))
}
