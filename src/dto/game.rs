use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dao::models::GameEntity,
    dto::format_system_time,
    services::randomizer_service::GameFilter,
};

/// Payload used to append a game to the catalog.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct GameInput {
    /// Display name of the game.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Single genre label (e.g. "RPG").
    #[validate(length(min = 1, max = 100))]
    pub genre: String,
    /// Short human readable description.
    #[serde(default)]
    pub description: String,
    /// Platforms the game is available on.
    #[validate(length(min = 1))]
    pub platforms: Vec<String>,
    /// Play modes the game supports.
    #[validate(length(min = 1))]
    pub modes: Vec<String>,
    /// Store-name to URL mapping. Entries are optional.
    #[serde(default)]
    pub store_links: IndexMap<String, String>,
    /// Cover image URL.
    #[validate(url)]
    pub image: String,
}

/// Public projection of a catalog game.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GameSummary {
    /// Stable identifier for the game.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Single genre label.
    pub genre: String,
    /// Short description.
    pub description: String,
    /// Platforms the game is available on.
    pub platforms: Vec<String>,
    /// Play modes the game supports.
    pub modes: Vec<String>,
    /// Store-name to URL mapping.
    pub store_links: IndexMap<String, String>,
    /// Cover image URL.
    pub image: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<GameEntity> for GameSummary {
    fn from(entity: GameEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            genre: entity.genre,
            description: entity.description,
            platforms: entity.platforms,
            modes: entity.modes,
            store_links: entity.store_links,
            image: entity.image,
            created_at: format_system_time(entity.created_at),
        }
    }
}

/// Query parameters accepted by the random selection endpoint.
///
/// Each field is optional; the literal value `all` means "no constraint",
/// matching what the frontend sends for an untouched dropdown.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct RandomQuery {
    /// Genre constraint, or `all`.
    pub genre: Option<String>,
    /// Platform constraint, or `all`.
    pub platform: Option<String>,
    /// Mode constraint, or `all`.
    pub mode: Option<String>,
}

impl From<RandomQuery> for GameFilter {
    fn from(query: RandomQuery) -> Self {
        GameFilter {
            genre: query.genre,
            platform: query.platform,
            mode: query.mode,
        }
    }
}
