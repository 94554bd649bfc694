//! Request/response shapes exposed over HTTP.

use std::time::SystemTime;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Authentication payloads.
pub mod auth;
/// Favorites list payloads.
pub mod favorites;
/// Game catalog and randomizer payloads.
pub mod game;
/// Health check payload.
pub mod health;
/// Validation helpers for DTO fields.
pub mod validation;

fn format_system_time(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
