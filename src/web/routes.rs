//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    edit_profile_page, edit_profile_submit, index_handler, login_page, login_submit,
    logout_handler, not_found_handler, register_page, register_submit, user_handler,
};
use crate::web::middleware::{session, web_auth};
use axum::{Router, middleware, routing::get};

/// Pages requiring a signed-in user.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /`, `GET /index` - Home page
/// - `GET /user/{username}` - Profile page
/// - `GET|POST /edit_profile` - Profile editor
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/index", get(index_handler))
        .route("/user/{username}", get(user_handler))
        .route(
            "/edit_profile",
            get(edit_profile_page).post(edit_profile_submit),
        )
}

/// Pages open to anonymous visitors.
///
/// # Endpoints
///
/// - `GET|POST /login` - Sign in
/// - `GET /logout` - Sign out
/// - `GET|POST /register` - Create an account
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout_handler))
        .route("/register", get(register_page).post(register_submit))
}

/// All pages with session handling and the 404 fallback.
///
/// The session layer wraps everything, so handlers and the login-required
/// check both see the resolved [`crate::web::context::CurrentUser`].
pub fn router(state: AppState) -> Router<AppState> {
    let protected = protected_routes().route_layer(middleware::from_fn(web_auth::layer));

    Router::new()
        .merge(protected)
        .merge(public_routes())
        .fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(state, session::layer))
}
