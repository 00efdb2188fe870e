//! Shared application state.

use std::sync::Arc;

use crate::content::ContentLibrary;
use crate::db::DbPool;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Single shared database (profile, users, sessions)
    pub pool: DbPool,

    /// Content tables, loaded once at startup
    pub content: Arc<ContentLibrary>,
}

impl AppState {
    pub fn new(pool: DbPool, content: ContentLibrary) -> Self {
        Self {
            pool,
            content: Arc::new(content),
        }
    }
}
