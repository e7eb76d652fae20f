//! Server application state

use storage::FileStore;
use validation::UploadPolicy;

/// Shared state handed to every handler
pub struct AppState {
    pub store: FileStore,
    pub policy: UploadPolicy,
}

impl AppState {
    pub fn new(store: FileStore, policy: UploadPolicy) -> Self {
        Self { store, policy }
    }
}
