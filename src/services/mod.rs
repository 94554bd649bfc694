/// Registration, login, and password hashing.
pub mod auth_service;
/// Game catalog listing, appending, and seeding.
pub mod catalog_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Favorites mutations with server-authoritative reconciliation semantics.
pub mod favorites_service;
/// Health check service.
pub mod health_service;
/// Filtered uniform random game selection.
pub mod randomizer_service;
/// Storage reconnect loop with degraded-mode toggling.
pub mod storage_supervisor;
/// Session token issuing and verification.
pub mod token_service;
