//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::MappingService;

/// Application state cloned into every request.
///
/// Holds only the service; all mutable state lives behind the repository.
#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
}

impl AppState {
    pub fn new(mapping_service: Arc<MappingService>) -> Self {
        Self { mapping_service }
    }
}
