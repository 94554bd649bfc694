use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::dao::{
    document_store::DocumentStore,
    models::{GameEntity, UserEntity},
    storage::StorageResult,
};

use super::{
    config::FileStoreConfig,
    error::{FileDaoError, FileResult},
};

const USERS_COLLECTION: &str = "users";
const GAMES_COLLECTION: &str = "games";

/// Store keeping one pretty-printed JSON document per collection on disk.
///
/// Writes go through a temp file followed by a rename so a crash mid-write
/// never leaves a half-written collection behind.
#[derive(Clone)]
pub struct JsonFileStore {
    data_dir: Arc<Path>,
}

impl JsonFileStore {
    /// Open the store, creating the data directory when it does not exist.
    pub async fn connect(config: FileStoreConfig) -> FileResult<Self> {
        let store = Self {
            data_dir: Arc::from(config.data_dir.as_path()),
        };
        store.ensure_data_dir().await?;
        Ok(store)
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    async fn ensure_data_dir(&self) -> FileResult<()> {
        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|source| FileDaoError::CreateDir {
                path: self.data_dir.to_path_buf(),
                source,
            })
    }

    /// Read a whole collection, treating a missing document as empty.
    async fn read_collection<T>(&self, collection: &str) -> FileResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = self.document_path(collection);
        let contents = match fs::read(&path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(FileDaoError::ReadDocument { path, source }),
        };

        serde_json::from_slice(&contents)
            .map_err(|source| FileDaoError::DecodeDocument { path, source })
    }

    /// Replace a whole collection via temp-file write and rename.
    async fn write_collection<T>(&self, collection: &'static str, records: &[T]) -> FileResult<()>
    where
        T: Serialize,
    {
        let encoded = serde_json::to_vec_pretty(records)
            .map_err(|source| FileDaoError::EncodeCollection { collection, source })?;

        let path = self.document_path(collection);
        let tmp_path = self.document_path(&format!("{collection}.tmp"));

        fs::write(&tmp_path, &encoded)
            .await
            .map_err(|source| FileDaoError::WriteDocument {
                path: tmp_path.clone(),
                source,
            })?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|source| FileDaoError::WriteDocument { path, source })
    }
}

impl DocumentStore for JsonFileStore {
    fn read_users(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .read_collection(USERS_COLLECTION)
                .await
                .map_err(Into::into)
        })
    }

    fn write_users(&self, users: Vec<UserEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .write_collection(USERS_COLLECTION, &users)
                .await
                .map_err(Into::into)
        })
    }

    fn read_games(&self) -> BoxFuture<'static, StorageResult<Vec<GameEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .read_collection(GAMES_COLLECTION)
                .await
                .map_err(Into::into)
        })
    }

    fn write_games(&self, games: Vec<GameEntity>) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .write_collection(GAMES_COLLECTION, &games)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let metadata = fs::metadata(&*store.data_dir).await.map_err(|source| {
                FileDaoError::ReadDocument {
                    path: store.data_dir.to_path_buf(),
                    source,
                }
            })?;
            if metadata.is_dir() {
                Ok(())
            } else {
                Err(FileDaoError::ReadDocument {
                    path: store.data_dir.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotADirectory,
                        "data path is not a directory",
                    ),
                }
                .into())
            }
        })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ensure_data_dir().await.map_err(Into::into) })
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use uuid::Uuid;

    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("next-game-store-{}", Uuid::new_v4()))
    }

    fn sample_user() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            username: "taras".into(),
            email: "taras@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            favorites: vec![Uuid::new_v4()],
            created_at: SystemTime::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn missing_document_reads_as_empty() {
        let store = JsonFileStore::connect(FileStoreConfig::new(scratch_dir()))
            .await
            .unwrap();
        assert!(store.read_users().await.unwrap().is_empty());
        assert!(store.read_games().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn written_users_read_back_identically() {
        let store = JsonFileStore::connect(FileStoreConfig::new(scratch_dir()))
            .await
            .unwrap();
        let users = vec![sample_user(), sample_user()];

        store.write_users(users.clone()).await.unwrap();
        assert_eq!(store.read_users().await.unwrap(), users);
    }

    #[tokio::test]
    async fn corrupted_document_surfaces_decode_error() {
        let dir = scratch_dir();
        let store = JsonFileStore::connect(FileStoreConfig::new(dir.clone()))
            .await
            .unwrap();
        fs::write(dir.join("users.json"), b"{ not json ]")
            .await
            .unwrap();

        let err = store.read_users().await.unwrap_err();
        assert!(err.to_string().contains("corrupted"), "got: {err}");
    }
}
