// Application state module
// Read-only state shared by all connections

use std::sync::atomic::AtomicBool;

use super::types::Config;

/// Application state
///
/// The harness is statically configured; requests share the configuration
/// and nothing else.
pub struct AppState {
    pub config: Config,

    // Cached flag for lock-free access on the accept path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);
        Self {
            config,
            cached_access_log,
        }
    }
}
