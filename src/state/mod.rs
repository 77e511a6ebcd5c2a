use std::sync::Arc;

use crate::dao::player_store::{BackendKind, PlayerStore};

/// State handle cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Central application state holding the player store selected at startup.
///
/// The store is injected once by the bootstrap and never swapped afterwards.
pub struct AppState {
    player_store: Arc<dyn PlayerStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(player_store: Arc<dyn PlayerStore>) -> SharedState {
        Arc::new(Self { player_store })
    }

    /// Handle to the active player store.
    pub fn player_store(&self) -> Arc<dyn PlayerStore> {
        self.player_store.clone()
    }

    /// Backend family serving this process.
    pub fn backend(&self) -> BackendKind {
        self.player_store.backend()
    }
}
