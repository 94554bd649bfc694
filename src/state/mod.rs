//! Shared application state wiring the store, config, and per-user gates.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, RwLock, watch};
use uuid::Uuid;

use crate::{config::AppConfig, dao::document_store::DocumentStore, error::ServiceError};

/// Cheaply cloneable handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state storing the store handle and runtime config.
pub struct AppState {
    config: AppConfig,
    document_store: RwLock<Option<Arc<dyn DocumentStore>>>,
    degraded: watch::Sender<bool>,
    user_gates: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            document_store: RwLock::new(None),
            degraded: degraded_tx,
            user_gates: DashMap::new(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current document store, if one is installed.
    pub async fn document_store(&self) -> Option<Arc<dyn DocumentStore>> {
        let guard = self.document_store.read().await;
        guard.as_ref().cloned()
    }

    /// Obtain the document store or fail with a degraded-mode error.
    pub async fn require_document_store(&self) -> Result<Arc<dyn DocumentStore>, ServiceError> {
        self.document_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new document store implementation and leave degraded mode.
    pub async fn set_document_store(&self, store: Arc<dyn DocumentStore>) {
        {
            let mut guard = self.document_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current document store and enter degraded mode.
    pub async fn clear_document_store(&self) {
        {
            let mut guard = self.document_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update and broadcast the degraded flag when the value changes.
    pub fn update_degraded(&self, value: bool) {
        if self.is_degraded() == value {
            return;
        }

        let _ = self.degraded.send(value);
    }

    /// Async gate serializing favorite mutations for one user.
    ///
    /// The store offers no transaction isolation, so concurrent
    /// read-modify-write cycles against the same favorites list would race.
    /// Mutations for different users stay concurrent.
    pub fn user_gate(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_gates
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
