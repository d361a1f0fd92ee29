//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::store::sqlite::DetectionStore;

pub struct AppStateInner {
    pub store: DetectionStore,
}

pub type AppState = Arc<AppStateInner>;

pub fn build_state(config: &Config) -> AppState {
    with_store(DetectionStore::new(config.db_path.clone()))
}

pub fn with_store(store: DetectionStore) -> AppState {
    Arc::new(AppStateInner { store })
}
