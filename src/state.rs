//! Application state shared across admin API handlers.

use std::sync::Arc;

use crate::service::counting::CountingService;

/// Application state containing shared resources.
///
/// Cloned for each request through Axum's state extraction; every field is cheap to
/// clone.
#[derive(Clone)]
pub struct AppState {
    /// Counting engine shared with the Discord event handler.
    pub counting: Arc<CountingService>,

    /// Bearer token for mutating endpoints, `None` disables them.
    pub admin_api_token: Option<Arc<str>>,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// # Arguments
    /// - `counting` - Counting engine
    /// - `admin_api_token` - Bearer token for mutating endpoints
    ///
    /// # Returns
    /// - `AppState` - Initialized application state
    pub fn new(counting: Arc<CountingService>, admin_api_token: Option<String>) -> Self {
        Self {
            counting,
            admin_api_token: admin_api_token.map(Arc::from),
        }
    }
}
