//! Application state for the web server.

use std::sync::Arc;

use orderscope::{Dashboard, RegionFilter};

/// Shared application state.
///
/// The dataset is loaded once and never mutated, so requests share it
/// without a lock.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    /// Create new application state.
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
        }
    }

    /// Resolve a `states` query value. Absent means the default
    /// pre-selection; an empty value means every state.
    pub fn filter(&self, states: Option<&str>) -> RegionFilter {
        match states {
            Some(list) => RegionFilter::parse(list),
            None => self.dashboard.default_filter(),
        }
    }
}
