//! Logout handler.

use axum::{extract::State, response::Response};

use crate::state::AppState;
use crate::web::context::CurrentUser;
use crate::web::flash;

/// Ends the session and returns to the home page.
///
/// # Endpoint
///
/// `GET /logout`
///
/// Anonymous visitors are redirected the same way; `/index` then sends them
/// on to the login page.
pub async fn logout_handler(State(state): State<AppState>, current: CurrentUser) -> Response {
    if let CurrentUser(Some(user)) = &current {
        tracing::info!(user_id = user.id, "user logged out");
    }

    flash::redirect_with_cookies("/index", vec![state.sessions.clear()])
}
