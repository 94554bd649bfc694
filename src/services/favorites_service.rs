//! Favorites mutations under server authority.
//!
//! The persisted per-user favorites list is the sole source of truth; clients
//! mirror it optimistically and resynchronize by rereading after any
//! ambiguous or partially failed mutation. Every operation here holds the
//! per-user gate for its whole read-modify-write cycle, so one user's
//! mutations never interleave server-side.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    dao::models::UserEntity, dto::game::GameSummary, error::ServiceError,
    services::catalog_service, state::SharedState,
};

/// Append `game_id` to the user's favorites and return the updated id list.
///
/// A duplicate add is a distinguishable conflict, not a silent success;
/// callers treat it as non-fatal.
pub async fn add_favorite(
    state: &SharedState,
    user_id: Uuid,
    game_id: Uuid,
) -> Result<Vec<Uuid>, ServiceError> {
    let gate = state.user_gate(user_id);
    let _guard = gate.lock().await;

    if catalog_service::find_by_id(state, game_id).await?.is_none() {
        return Err(ServiceError::NotFound(format!("game `{game_id}` not found")));
    }

    let store = state.require_document_store().await?;
    let mut users = store.read_users().await?;
    let user = find_user_mut(&mut users, user_id)?;
    if user.has_favorite(game_id) {
        return Err(ServiceError::Conflict("already a favorite".into()));
    }

    user.favorites.push(game_id);
    let favorites = user.favorites.clone();
    store.write_users(users).await?;

    Ok(favorites)
}

/// Remove `game_id` from the user's favorites and return the updated id list.
///
/// Idempotent: removing an absent id succeeds silently and leaves the
/// persisted list untouched.
pub async fn remove_favorite(
    state: &SharedState,
    user_id: Uuid,
    game_id: Uuid,
) -> Result<Vec<Uuid>, ServiceError> {
    let gate = state.user_gate(user_id);
    let _guard = gate.lock().await;

    let store = state.require_document_store().await?;
    let mut users = store.read_users().await?;
    let user = find_user_mut(&mut users, user_id)?;

    if !user.has_favorite(game_id) {
        return Ok(user.favorites.clone());
    }

    user.favorites.retain(|id| *id != game_id);
    let favorites = user.favorites.clone();
    store.write_users(users).await?;

    Ok(favorites)
}

/// Resolve the user's favorites against the catalog, in favorites order.
///
/// Ids whose game has since disappeared from the catalog are pruned from the
/// result and from the persisted list in the same pass, so a dangling
/// reference is repaired the first time it is observed.
pub async fn list_favorites(
    state: &SharedState,
    user_id: Uuid,
) -> Result<Vec<GameSummary>, ServiceError> {
    let gate = state.user_gate(user_id);
    let _guard = gate.lock().await;

    let store = state.require_document_store().await?;
    let games = store.read_games().await?;
    let by_id = games
        .into_iter()
        .map(|game| (game.id, game))
        .collect::<HashMap<_, _>>();

    let mut users = store.read_users().await?;
    let user = find_user_mut(&mut users, user_id)?;

    let resolved = user
        .favorites
        .iter()
        .filter_map(|id| by_id.get(id).cloned())
        .map(Into::into)
        .collect::<Vec<GameSummary>>();

    if resolved.len() != user.favorites.len() {
        user.favorites.retain(|id| by_id.contains_key(id));
        store.write_users(users).await?;
    }

    Ok(resolved)
}

fn find_user_mut(users: &mut [UserEntity], user_id: Uuid) -> Result<&mut UserEntity, ServiceError> {
    users
        .iter_mut()
        .find(|user| user.id == user_id)
        .ok_or_else(|| ServiceError::NotFound(format!("user `{user_id}` not found")))
}
