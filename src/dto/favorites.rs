use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::game::GameSummary;

/// Updated favorites id list returned by like/unlike operations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteIdsResponse {
    /// Favorited game ids after the mutation, in insertion order.
    pub favorites: Vec<Uuid>,
}

/// Resolved favorites returned by the listing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteGamesResponse {
    /// Favorited games, in favorites-list order.
    pub favorites: Vec<GameSummary>,
}
