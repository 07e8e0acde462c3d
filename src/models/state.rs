use std::sync::Arc;

use tracing::info;

use crate::services::repository::ScheduleRepository;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Storage backend for provider availability documents.
    pub repository: Arc<dyn ScheduleRepository>,
}

impl AppState {
    /// Creates a new application state with the provided repository.
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        info!("Initializing application state");
        Self { repository }
    }
}
