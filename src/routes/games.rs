use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_valid::Valid;
use uuid::Uuid;

use crate::{
    dto::{
        favorites::FavoriteIdsResponse,
        game::{GameInput, GameSummary, RandomQuery},
    },
    error::AppError,
    routes::identity::Identity,
    services::{catalog_service, favorites_service, randomizer_service},
    state::SharedState,
};

/// Catalog, random selection, and like/unlike routes.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", get(list_games).post(append_game))
        .route("/random", get(random_game))
        .route("/games/{id}/like", post(like_game).delete(unlike_game))
}

#[utoipa::path(
    get,
    path = "/games",
    tag = "games",
    responses((status = 200, description = "Full catalog in insertion order", body = [GameSummary]))
)]
/// Return the full game catalog.
pub async fn list_games(
    State(state): State<SharedState>,
) -> Result<Json<Vec<GameSummary>>, AppError> {
    let games = catalog_service::list_games(&state).await?;
    Ok(Json(games))
}

#[utoipa::path(
    post,
    path = "/games",
    tag = "games",
    request_body = GameInput,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Game appended", body = GameSummary),
        (status = 401, description = "Missing or invalid token")
    )
)]
/// Append a game to the catalog. Requires authentication.
pub async fn append_game(
    State(state): State<SharedState>,
    _identity: Identity,
    Valid(Json(payload)): Valid<Json<GameInput>>,
) -> Result<(StatusCode, Json<GameSummary>), AppError> {
    let game = catalog_service::append_game(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

#[utoipa::path(
    get,
    path = "/random",
    tag = "games",
    params(RandomQuery),
    responses(
        (status = 200, description = "Randomly selected matching game", body = GameSummary),
        (status = 404, description = "No game matches the filters")
    )
)]
/// Draw a uniformly random game matching the query filters.
pub async fn random_game(
    State(state): State<SharedState>,
    Query(query): Query<RandomQuery>,
) -> Result<Json<GameSummary>, AppError> {
    let game = randomizer_service::select_random(&state, query.into()).await?;
    Ok(Json(game))
}

#[utoipa::path(
    post,
    path = "/games/{id}/like",
    tag = "favorites",
    params(("id" = Uuid, Path, description = "Game to favorite")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated favorites id list", body = FavoriteIdsResponse),
        (status = 404, description = "User or game not found"),
        (status = 409, description = "Already a favorite")
    )
)]
/// Add a game to the authenticated user's favorites.
pub async fn like_game(
    State(state): State<SharedState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteIdsResponse>, AppError> {
    let favorites = favorites_service::add_favorite(&state, identity.user_id, id).await?;
    Ok(Json(FavoriteIdsResponse { favorites }))
}

#[utoipa::path(
    delete,
    path = "/games/{id}/like",
    tag = "favorites",
    params(("id" = Uuid, Path, description = "Game to unfavorite")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated favorites id list", body = FavoriteIdsResponse),
        (status = 404, description = "User not found")
    )
)]
/// Remove a game from the authenticated user's favorites. Idempotent.
pub async fn unlike_game(
    State(state): State<SharedState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteIdsResponse>, AppError> {
    let favorites = favorites_service::remove_favorite(&state, identity.user_id, id).await?;
    Ok(Json(FavoriteIdsResponse { favorites }))
}
