/// File-backed store keeping one JSON document per collection.
pub mod json_file;
/// In-memory store used by tests and demos.
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::models::{GameEntity, UserEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for users and the game catalog.
///
/// Collections are read and written whole; no transactional guarantee is
/// offered, so callers must tolerate read-modify-write races and serialize
/// conflicting mutations themselves.
pub trait DocumentStore: Send + Sync {
    /// Read the full `users` collection.
    fn read_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>>;
    /// Replace the full `users` collection.
    fn write_users(&self, users: Vec<UserEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Read the full `games` collection in insertion order.
    fn read_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>>;
    /// Replace the full `games` collection.
    fn write_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>>;
    /// Cheap probe used by the supervisor to detect a dead backend.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Attempt to re-establish the backend after a failed health check.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
