//! Client-side session and favorites controller.
//!
//! Mirrors server-persisted favorites optimistically and resynchronizes to
//! server ground truth after any ambiguous or partially failed mutation. The
//! server is always authoritative: on doubt this module rereads rather than
//! merging locally.

mod api;
mod favorites;

pub use api::{ApiClient, ApiError};
pub use favorites::{AddOutcome, ControllerError, FavoritesApi, FavoritesController, MirrorPhase};
