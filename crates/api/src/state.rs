use std::sync::Arc;

use crate::config::ServerConfig;
use crate::dictionaries::DictionaryStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Message dictionaries, loaded once at start-up.
    pub dictionaries: Arc<DictionaryStore>,
}
