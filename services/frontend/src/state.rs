//! Application state shared across handlers

use common::backend::BackendClient;

use crate::session::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub sessions: SessionStore,
    pub max_upload_bytes: usize,
}
