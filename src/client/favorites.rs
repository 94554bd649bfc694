//! Client-side favorites mirror with reconciliation-by-reread.

use std::sync::Arc;

use futures::future::{BoxFuture, join_all};
use tracing::warn;
use uuid::Uuid;

use crate::dto::game::GameSummary;

use super::api::{ApiClient, ApiError};

/// Favorites surface the controller needs from the backend.
///
/// [`ApiClient`] is the production implementation; tests inject a scripted
/// fake to exercise failure recovery without a network.
pub trait FavoritesApi: Send + Sync {
    /// Fetch the server's favorites for `user_id`, resolved to full games.
    fn list_favorites(&self, user_id: Uuid) -> BoxFuture<'_, Result<Vec<GameSummary>, ApiError>>;
    /// Favorite a game, returning the updated id list.
    fn like(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>>;
    /// Unfavorite a game, returning the updated id list.
    fn unlike(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>>;
}

impl FavoritesApi for ApiClient {
    fn list_favorites(&self, user_id: Uuid) -> BoxFuture<'_, Result<Vec<GameSummary>, ApiError>> {
        Box::pin(self.favorites(user_id))
    }

    fn like(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>> {
        Box::pin(ApiClient::like(self, game_id))
    }

    fn unlike(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>> {
        Box::pin(ApiClient::unlike(self, game_id))
    }
}

/// Lifecycle of the client-side favorites mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorPhase {
    /// No server state fetched yet; mutations are rejected.
    Unloaded,
    /// Initial fetch in flight.
    Loading,
    /// Mirror reflects the last known server state.
    Ready,
    /// A mutation is in flight.
    Mutating,
    /// A mutation failed; rereading server ground truth.
    Reconciling,
}

/// Errors surfaced by [`FavoritesController`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The mirror is not in a state that accepts this call.
    #[error("favorites mirror is {0:?}; load it before mutating")]
    NotReady(MirrorPhase),
    /// The backend rejected the call.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Distinguishable outcomes of an add, per the already-favorite contract.
#[derive(Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The game was appended to the favorites.
    Added,
    /// The server reported a conflict; treated as a no-op the caller may
    /// surface as a notification.
    AlreadyFavorite,
}

/// Holds the favorites mirror for one authenticated user.
///
/// Mutations are serialized by construction (each takes `&mut self`), the
/// discipline recommended for avoiding lost updates: queue, not
/// parallel-fire. After any failed mutation the mirror is resynchronized by
/// rereading the server rather than by guessing a local merge.
pub struct FavoritesController {
    api: Arc<dyn FavoritesApi>,
    user_id: Uuid,
    phase: MirrorPhase,
    mirror: Vec<GameSummary>,
}

impl FavoritesController {
    /// Create a controller for `user_id` with an unloaded mirror.
    pub fn new(api: Arc<dyn FavoritesApi>, user_id: Uuid) -> Self {
        Self {
            api,
            user_id,
            phase: MirrorPhase::Unloaded,
            mirror: Vec::new(),
        }
    }

    /// Current mirror phase.
    pub fn phase(&self) -> MirrorPhase {
        self.phase
    }

    /// Mirrored favorites, in server order.
    pub fn favorites(&self) -> &[GameSummary] {
        &self.mirror
    }

    /// Whether `game_id` is in the mirror.
    pub fn is_favorite(&self, game_id: Uuid) -> bool {
        self.mirror.iter().any(|game| game.id == game_id)
    }

    /// Fetch the server state into the mirror. Also used to refresh.
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        if !matches!(self.phase, MirrorPhase::Unloaded | MirrorPhase::Ready) {
            return Err(ControllerError::NotReady(self.phase));
        }

        self.phase = MirrorPhase::Loading;
        match self.api.list_favorites(self.user_id).await {
            Ok(favorites) => {
                self.mirror = favorites;
                self.phase = MirrorPhase::Ready;
                Ok(())
            }
            Err(err) => {
                self.mirror.clear();
                self.phase = MirrorPhase::Unloaded;
                Err(err.into())
            }
        }
    }

    /// Favorite `game`, keeping the mirror in sync.
    ///
    /// A server conflict is recovered locally as [`AddOutcome::AlreadyFavorite`];
    /// any other failure triggers reconciliation before the error is returned.
    pub async fn add(&mut self, game: GameSummary) -> Result<AddOutcome, ControllerError> {
        self.ensure_ready()?;
        self.phase = MirrorPhase::Mutating;

        match self.api.like(game.id).await {
            Ok(_ids) => {
                if !self.is_favorite(game.id) {
                    self.mirror.push(game);
                }
                self.phase = MirrorPhase::Ready;
                Ok(AddOutcome::Added)
            }
            Err(ApiError::Conflict(_)) => {
                self.phase = MirrorPhase::Ready;
                Ok(AddOutcome::AlreadyFavorite)
            }
            Err(err) => {
                self.reconcile().await;
                Err(err.into())
            }
        }
    }

    /// Unfavorite `game_id`, keeping the mirror in sync.
    pub async fn remove(&mut self, game_id: Uuid) -> Result<(), ControllerError> {
        self.ensure_ready()?;
        self.phase = MirrorPhase::Mutating;

        match self.api.unlike(game_id).await {
            Ok(_ids) => {
                self.mirror.retain(|game| game.id != game_id);
                self.phase = MirrorPhase::Ready;
                Ok(())
            }
            Err(err) => {
                self.reconcile().await;
                Err(err.into())
            }
        }
    }

    /// Remove every favorite as a best-effort batch.
    ///
    /// One removal is issued per mirrored id and all outcomes are awaited
    /// before deciding success (all-settled, not fail-fast). When any removal
    /// fails the mirror is not trusted to reflect the partial state; the
    /// server is reread and its answer adopted wholesale before the first
    /// failure is surfaced.
    pub async fn clear_all(&mut self) -> Result<(), ControllerError> {
        self.ensure_ready()?;
        if self.mirror.is_empty() {
            return Ok(());
        }
        self.phase = MirrorPhase::Mutating;

        let removals = self
            .mirror
            .iter()
            .map(|game| {
                let api = Arc::clone(&self.api);
                let id = game.id;
                async move { api.unlike(id).await }
            })
            .collect::<Vec<_>>();
        let outcomes = join_all(removals).await;

        match outcomes.into_iter().find_map(Result::err) {
            None => {
                self.mirror.clear();
                self.phase = MirrorPhase::Ready;
                Ok(())
            }
            Some(first_failure) => {
                self.reconcile().await;
                Err(first_failure.into())
            }
        }
    }

    fn ensure_ready(&self) -> Result<(), ControllerError> {
        if self.phase == MirrorPhase::Ready {
            Ok(())
        } else {
            Err(ControllerError::NotReady(self.phase))
        }
    }

    /// Resynchronize the mirror to server ground truth after a failed
    /// mutation. Always prefer a reread over a locally computed merge.
    async fn reconcile(&mut self) {
        self.phase = MirrorPhase::Reconciling;
        match self.api.list_favorites(self.user_id).await {
            Ok(truth) => {
                self.mirror = truth;
                self.phase = MirrorPhase::Ready;
            }
            Err(err) => {
                // Ground truth is unknown; drop the mirror and force a reload.
                warn!(error = %err, "favorites reconciliation reread failed");
                self.mirror.clear();
                self.phase = MirrorPhase::Unloaded;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    /// Scripted backend: a favorites list plus per-game failure injection.
    #[derive(Default)]
    struct ScriptedApi {
        catalog: Vec<GameSummary>,
        server: Mutex<Vec<GameSummary>>,
        fail_unlike: Mutex<HashSet<Uuid>>,
        fail_list: Mutex<bool>,
    }

    impl ScriptedApi {
        fn new(catalog: Vec<GameSummary>, favorites: Vec<GameSummary>) -> Arc<Self> {
            Arc::new(Self {
                catalog,
                server: Mutex::new(favorites),
                fail_unlike: Mutex::new(HashSet::new()),
                fail_list: Mutex::new(false),
            })
        }

        fn fail_unlike_for(&self, game_id: Uuid) {
            self.fail_unlike.lock().unwrap().insert(game_id);
        }

        fn server_ids(&self) -> Vec<Uuid> {
            self.server.lock().unwrap().iter().map(|g| g.id).collect()
        }
    }

    impl FavoritesApi for ScriptedApi {
        fn list_favorites(
            &self,
            _user_id: Uuid,
        ) -> BoxFuture<'_, Result<Vec<GameSummary>, ApiError>> {
            let result = if *self.fail_list.lock().unwrap() {
                Err(ApiError::Server {
                    status: 500,
                    message: "scripted list failure".into(),
                })
            } else {
                Ok(self.server.lock().unwrap().clone())
            };
            Box::pin(async move { result })
        }

        fn like(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>> {
            let mut server = self.server.lock().unwrap();
            let result = if server.iter().any(|g| g.id == game_id) {
                Err(ApiError::Conflict("already a favorite".into()))
            } else if let Some(game) = self.catalog.iter().find(|g| g.id == game_id) {
                server.push(game.clone());
                Ok(server.iter().map(|g| g.id).collect())
            } else {
                Err(ApiError::NotFound("game not found".into()))
            };
            Box::pin(async move { result })
        }

        fn unlike(&self, game_id: Uuid) -> BoxFuture<'_, Result<Vec<Uuid>, ApiError>> {
            let result = if self.fail_unlike.lock().unwrap().contains(&game_id) {
                Err(ApiError::Server {
                    status: 500,
                    message: "scripted unlike failure".into(),
                })
            } else {
                let mut server = self.server.lock().unwrap();
                server.retain(|g| g.id != game_id);
                Ok(server.iter().map(|g| g.id).collect())
            };
            Box::pin(async move { result })
        }
    }

    fn game(name: &str) -> GameSummary {
        GameSummary {
            id: Uuid::new_v4(),
            name: name.into(),
            genre: "RPG".into(),
            description: String::new(),
            platforms: vec!["PC".into()],
            modes: vec!["Singleplayer".into()],
            store_links: Default::default(),
            image: String::new(),
            created_at: String::new(),
        }
    }

    fn mirror_ids(controller: &FavoritesController) -> Vec<Uuid> {
        controller.favorites().iter().map(|g| g.id).collect()
    }

    #[tokio::test]
    async fn load_brings_mirror_to_ready() {
        let favorites = vec![game("A"), game("B")];
        let api = ScriptedApi::new(favorites.clone(), favorites.clone());
        let mut controller = FavoritesController::new(api, Uuid::new_v4());

        assert_eq!(controller.phase(), MirrorPhase::Unloaded);
        controller.load().await.unwrap();
        assert_eq!(controller.phase(), MirrorPhase::Ready);
        assert_eq!(controller.favorites().len(), 2);
    }

    #[tokio::test]
    async fn mutations_rejected_before_load() {
        let api = ScriptedApi::new(vec![], vec![]);
        let mut controller = FavoritesController::new(api, Uuid::new_v4());

        let err = controller.add(game("A")).await.unwrap_err();
        assert!(matches!(err, ControllerError::NotReady(MirrorPhase::Unloaded)));
        let err = controller.clear_all().await.unwrap_err();
        assert!(matches!(err, ControllerError::NotReady(MirrorPhase::Unloaded)));
    }

    #[tokio::test]
    async fn add_appends_and_conflict_is_local_noop() {
        let a = game("A");
        let api = ScriptedApi::new(vec![a.clone()], vec![]);
        let mut controller = FavoritesController::new(api.clone(), Uuid::new_v4());
        controller.load().await.unwrap();

        assert_eq!(controller.add(a.clone()).await.unwrap(), AddOutcome::Added);
        assert!(controller.is_favorite(a.id));

        // The duplicate add is distinguishable but non-fatal.
        assert_eq!(
            controller.add(a.clone()).await.unwrap(),
            AddOutcome::AlreadyFavorite
        );
        assert_eq!(controller.favorites().len(), 1);
        assert_eq!(controller.phase(), MirrorPhase::Ready);
    }

    #[tokio::test]
    async fn failed_remove_reconciles_to_server_truth() {
        let a = game("A");
        let api = ScriptedApi::new(vec![a.clone()], vec![a.clone()]);
        api.fail_unlike_for(a.id);
        let mut controller = FavoritesController::new(api.clone(), Uuid::new_v4());
        controller.load().await.unwrap();

        let err = controller.remove(a.id).await.unwrap_err();
        assert!(matches!(err, ControllerError::Api(ApiError::Server { .. })));

        // The removal never happened server-side, so the reread restores it.
        assert_eq!(controller.phase(), MirrorPhase::Ready);
        assert_eq!(mirror_ids(&controller), api.server_ids());
    }

    #[tokio::test]
    async fn clear_all_success_empties_mirror_and_server() {
        let favorites = vec![game("A"), game("B"), game("C")];
        let api = ScriptedApi::new(favorites.clone(), favorites);
        let mut controller = FavoritesController::new(api.clone(), Uuid::new_v4());
        controller.load().await.unwrap();

        controller.clear_all().await.unwrap();
        assert!(controller.favorites().is_empty());
        assert!(api.server_ids().is_empty());
        assert_eq!(controller.phase(), MirrorPhase::Ready);
    }

    #[tokio::test]
    async fn partial_clear_failure_converges_on_server_truth() {
        let (a, b, c) = (game("A"), game("B"), game("C"));
        let favorites = vec![a.clone(), b.clone(), c.clone()];
        let api = ScriptedApi::new(favorites.clone(), favorites);
        api.fail_unlike_for(b.id);
        let mut controller = FavoritesController::new(api.clone(), Uuid::new_v4());
        controller.load().await.unwrap();

        let err = controller.clear_all().await.unwrap_err();
        assert!(matches!(err, ControllerError::Api(ApiError::Server { .. })));

        // A and C were removed server-side, B's removal failed. The mirror
        // must equal the reread ground truth, not a client-guessed subset.
        assert_eq!(api.server_ids(), vec![b.id]);
        assert_eq!(mirror_ids(&controller), api.server_ids());
        assert_eq!(controller.phase(), MirrorPhase::Ready);
    }

    #[tokio::test]
    async fn failed_reconciliation_reread_unloads_mirror() {
        let a = game("A");
        let api = ScriptedApi::new(vec![a.clone()], vec![a.clone()]);
        api.fail_unlike_for(a.id);
        let mut controller = FavoritesController::new(api.clone(), Uuid::new_v4());
        controller.load().await.unwrap();
        *api.fail_list.lock().unwrap() = true;

        controller.remove(a.id).await.unwrap_err();
        assert_eq!(controller.phase(), MirrorPhase::Unloaded);
        assert!(controller.favorites().is_empty());
    }
}
