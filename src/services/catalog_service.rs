//! Game catalog operations: listing, appending, and first-run seeding.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::info;
use uuid::Uuid;

use crate::{
    config::SeedGame,
    dao::{document_store::DocumentStore, models::GameEntity, storage::StorageResult},
    dto::game::{GameInput, GameSummary},
    error::ServiceError,
    state::SharedState,
};

/// Return the full catalog in insertion order.
pub async fn list_games(state: &SharedState) -> Result<Vec<GameSummary>, ServiceError> {
    let games = read_catalog(state).await?;
    Ok(games.into_iter().map(Into::into).collect())
}

/// Append a game to the catalog, assigning a fresh id and creation timestamp.
///
/// Any authenticated user may append; there is no role check in this design.
pub async fn append_game(
    state: &SharedState,
    input: GameInput,
) -> Result<GameSummary, ServiceError> {
    let store = state.require_document_store().await?;
    let mut games = store.read_games().await?;

    let game = GameEntity {
        id: Uuid::new_v4(),
        name: input.name,
        genre: input.genre,
        description: input.description,
        platforms: input.platforms,
        modes: input.modes,
        store_links: input.store_links,
        image: input.image,
        created_at: SystemTime::now(),
    };

    games.push(game.clone());
    store.write_games(games).await?;

    Ok(game.into())
}

/// Look up a single catalog game by id.
pub async fn find_by_id(
    state: &SharedState,
    id: Uuid,
) -> Result<Option<GameEntity>, ServiceError> {
    let games = read_catalog(state).await?;
    Ok(games.into_iter().find(|game| game.id == id))
}

/// Read the raw catalog entities.
pub async fn read_catalog(state: &SharedState) -> Result<Vec<GameEntity>, ServiceError> {
    let store = state.require_document_store().await?;
    Ok(store.read_games().await?)
}

/// Write the built-in catalog into an empty store.
///
/// Runs once per storage connection; a non-empty catalog is left untouched.
pub async fn seed_catalog(store: &Arc<dyn DocumentStore>, seeds: &[SeedGame]) -> StorageResult<()> {
    let existing = store.read_games().await?;
    if !existing.is_empty() {
        return Ok(());
    }

    let games = seeds
        .iter()
        .map(|seed| GameEntity {
            id: Uuid::new_v4(),
            name: seed.name.clone(),
            genre: seed.genre.clone(),
            description: seed.description.clone(),
            platforms: seed.platforms.clone(),
            modes: seed.modes.clone(),
            store_links: seed.store_links.clone(),
            image: seed.image.clone(),
            created_at: SystemTime::now(),
        })
        .collect::<Vec<_>>();

    let count = games.len();
    store.write_games(games).await?;
    info!(count, "seeded empty game catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::{config::AppConfig, dao::document_store::memory::MemoryStore};

    async fn test_state() -> SharedState {
        let state = crate::state::AppState::new(AppConfig::default());
        state.set_document_store(Arc::new(MemoryStore::new())).await;
        state
    }

    fn sample_input(name: &str) -> GameInput {
        GameInput {
            name: name.into(),
            genre: "RPG".into(),
            description: String::new(),
            platforms: vec!["PC".into()],
            modes: vec!["Singleplayer".into()],
            store_links: IndexMap::new(),
            image: "https://example.com/cover.jpg".into(),
        }
    }

    #[tokio::test]
    async fn appended_games_list_in_insertion_order() {
        let state = test_state().await;
        append_game(&state, sample_input("First")).await.unwrap();
        append_game(&state, sample_input("Second")).await.unwrap();

        let names = list_games(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|game| game.name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["First", "Second"]);
    }

    #[tokio::test]
    async fn seed_populates_only_an_empty_catalog() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let seeds = AppConfig::default().seed_games;

        seed_catalog(&store, &seeds).await.unwrap();
        let seeded = store.read_games().await.unwrap();
        assert_eq!(seeded.len(), seeds.len());

        // A second pass must not duplicate the catalog.
        seed_catalog(&store, &seeds).await.unwrap();
        assert_eq!(store.read_games().await.unwrap(), seeded);
    }
}
