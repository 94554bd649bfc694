mod config;
mod store;

/// Error types for the file-backed store.
pub mod error;

pub use config::FileStoreConfig;
pub use store::JsonFileStore;
