pub mod check_in;
pub mod config;
pub mod crisis;
pub mod history;
pub mod respond;
pub mod ritual;
pub mod talk;

use std::sync::Arc;

use lumora_core::{CrisisState, KeyValueStore, LumoraConfig, Session};
use miette::{IntoDiagnostic, Result};

/// Store key for a crisis flag carried between invocations
pub const CRISIS_STATE_KEY: &str = "lumora_crisis_state";

/// One CLI invocation's session over the configured data directory
///
/// Each run is a fresh process, so an active crisis flag is written back to
/// the store on close and restored on open. It stays until dismissed.
#[derive(Debug)]
pub struct Companion {
    pub session: Session,
    store: Arc<dyn KeyValueStore>,
}

impl Companion {
    pub async fn open(config: &LumoraConfig) -> Result<Self> {
        let data_dir = config.storage.resolve_data_dir();
        tracing::debug!("using data directory {}", data_dir.display());

        let store: Arc<dyn KeyValueStore> = Arc::new(config.storage.file_store());
        let mut session = Session::builder(store.clone()).build().await;

        if let Some(raw) = store.get(CRISIS_STATE_KEY).await? {
            match serde_json::from_str::<CrisisState>(&raw) {
                Ok(state) => session.restore_crisis(state),
                Err(e) => tracing::warn!("Ignoring unreadable crisis state: {}", e),
            }
        }

        Ok(Self { session, store })
    }

    /// Write the crisis flag back to the store
    pub async fn close(self) -> Result<()> {
        let state = self.session.crisis_state();
        if state.is_active {
            let raw = serde_json::to_string(state).into_diagnostic()?;
            self.store.set(CRISIS_STATE_KEY, raw).await?;
        } else {
            self.store.remove(CRISIS_STATE_KEY).await?;
        }
        Ok(())
    }
}
