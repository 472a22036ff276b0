//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::UserService;
use crate::auth::SessionManager;
use crate::infrastructure::persistence::PgUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new(user_service: Arc<UserService<PgUserRepository>>, sessions: Arc<SessionManager>) -> Self {
        Self {
            user_service,
            sessions,
        }
    }
}
