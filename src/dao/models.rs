use std::time::SystemTime;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registered user as persisted in the `users` collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    /// Stable identifier for the user.
    pub id: Uuid,
    /// Unique display name (case-sensitive).
    pub username: String,
    /// Unique e-mail address used as the login identifier.
    pub email: String,
    /// Argon2 hash of the password. Never leaves the persistence layer.
    pub password_hash: String,
    /// Ordered list of favorited game ids. Contains no duplicates.
    pub favorites: Vec<Uuid>,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

impl UserEntity {
    /// Whether `game_id` is already present in the favorites list.
    pub fn has_favorite(&self, game_id: Uuid) -> bool {
        self.favorites.contains(&game_id)
    }
}

/// Catalog game as persisted in the `games` collection.
///
/// Games are append-only: once created they are referenced by id from user
/// favorites and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Stable identifier for the game.
    pub id: Uuid,
    /// Display name of the game.
    pub name: String,
    /// Single genre label (e.g. "RPG").
    pub genre: String,
    /// Short human readable description.
    pub description: String,
    /// Platforms the game is available on.
    pub platforms: Vec<String>,
    /// Play modes the game supports (e.g. "Singleplayer").
    pub modes: Vec<String>,
    /// Store-name to URL mapping, insertion-ordered. Entries are optional.
    #[serde(default)]
    pub store_links: IndexMap<String, String>,
    /// Cover image URL.
    pub image: String,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}
