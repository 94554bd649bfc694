//! Library crate for next-game-back, exposing modules for the binary,
//! integration tests, and the embeddable client controller.

/// Client-side session and favorites controller.
#[cfg(feature = "client")]
pub mod client;
/// Runtime configuration.
pub mod config;
/// Persistence layer.
pub mod dao;
/// HTTP request/response shapes.
pub mod dto;
/// Error taxonomy.
pub mod error;
/// HTTP routes.
pub mod routes;
/// Business logic.
pub mod services;
/// Shared application state.
pub mod state;
