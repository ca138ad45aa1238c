//! Application state for Axum handlers.

use gatehouse_service::{SessionService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub session_service: Arc<dyn SessionService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        session_service: Arc<dyn SessionService>,
    ) -> Self {
        Self {
            user_service,
            session_service,
        }
    }
}
