//! Login-required middleware for protected pages.

use axum::{extract::Request, middleware::Next, response::Response};

use crate::web::context::CurrentUser;
use crate::web::cookies::CookiePolicy;
use crate::web::flash;

/// Message shown on the login page after an anonymous visit to a protected page.
pub const LOGIN_MESSAGE: &str = "Please log in to access this page.";

/// Admits signed-in users and bounces everyone else to the login page.
///
/// Must run inside [`super::session::layer`], which provides [`CurrentUser`].
///
/// # Redirect
///
/// Anonymous requests get `303 See Other` to `/login?next=<path and query>`
/// with a flash message, so a successful login returns the user to the page
/// they asked for.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/index", get(index_handler))
///     .route_layer(middleware::from_fn(web_auth::layer));
/// ```
pub async fn layer(req: Request, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<CurrentUser>()
        .is_some_and(CurrentUser::is_authenticated);

    if authenticated {
        return next.run(req).await;
    }

    let requested = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let policy = req
        .extensions()
        .get::<CookiePolicy>()
        .copied()
        .unwrap_or_default();

    flash::redirect_with_flash(policy, &login_url(&requested), LOGIN_MESSAGE)
}

/// `/login?next=...` with the target URL percent-encoded.
pub fn login_url(next: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(next.as_bytes()).collect();
    format!("/login?next={encoded}")
}
