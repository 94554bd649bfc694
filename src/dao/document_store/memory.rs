use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;

use crate::dao::{
    document_store::DocumentStore,
    models::{GameEntity, UserEntity},
    storage::StorageResult,
};

/// Store backed by process memory. Nothing survives a restart.
///
/// Used as the test double for service-level tests and for running the
/// backend without a data directory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<Mutex<Vec<UserEntity>>>,
    games: Arc<Mutex<Vec<GameEntity>>>,
}

impl MemoryStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a store pre-populated with a game catalog.
    pub fn with_games(games: Vec<GameEntity>) -> Self {
        let store = Self::default();
        *store.games.lock().expect("games lock poisoned") = games;
        store
    }
}

impl DocumentStore for MemoryStore {
    fn read_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let users = self.users.lock().expect("users lock poisoned").clone();
        Box::pin(async move { Ok(users) })
    }

    fn write_users(&self, users: Vec<UserEntity>) -> BoxFuture<'static, StorageResult<()>> {
        *self.users.lock().expect("users lock poisoned") = users;
        Box::pin(async move { Ok(()) })
    }

    fn read_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let games = self.games.lock().expect("games lock poisoned").clone();
        Box::pin(async move { Ok(games) })
    }

    fn write_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>> {
        *self.games.lock().expect("games lock poisoned") = games;
        Box::pin(async move { Ok(()) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async move { Ok(()) })
    }
}
