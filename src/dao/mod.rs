/// Persistence abstraction over the user and game collections.
pub mod document_store;
/// Persisted entity definitions.
pub mod models;
/// Storage error types shared by all store backends.
pub mod storage;
