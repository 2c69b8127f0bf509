use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::AppConfig;

/// Application state shared between connections
pub struct AppState {
    pub config: AppConfig,
    active_sessions: AtomicUsize,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            config,
            active_sessions: AtomicUsize::new(0),
        }
    }

    /// Returns the new number of open boards
    pub fn session_opened(&self) -> usize {
        self.active_sessions.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn session_closed(&self) -> usize {
        self.active_sessions.fetch_sub(1, Ordering::SeqCst).saturating_sub(1)
    }
}
