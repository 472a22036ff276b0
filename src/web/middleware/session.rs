//! Session resolution middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::session::SESSION_COOKIE;
use crate::state::AppState;
use crate::web::context::CurrentUser;
use crate::web::cookies::read_cookie;

/// Resolves the `session` cookie to a [`CurrentUser`] request extension.
///
/// # Flow
///
/// 1. Verify the cookie signature and expiry via [`crate::auth::SessionManager`]
/// 2. Load the user it names
/// 3. Record the user's activity (`last_seen = now`) before the handler runs
/// 4. Continue with `CurrentUser(Some(user))` and the site's
///    [`crate::web::cookies::CookiePolicy`]
///
/// Missing, forged or stale sessions, and sessions of users that no longer
/// exist, continue as anonymous. A failed `last_seen` update is logged and
/// does not fail the request.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let user_id = read_cookie(req.headers(), SESSION_COOKIE)
        .and_then(|value| st.sessions.verify(&value));

    let user = match user_id {
        Some(id) => match st.user_service.find_by_id(id).await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(user_id = id, error = %e, "failed to load session user");
                None
            }
        },
        None => None,
    };

    if let Some(user) = &user
        && let Err(e) = st.user_service.record_activity(user.id).await
    {
        tracing::warn!(user_id = user.id, error = %e, "failed to record last seen");
    }

    req.extensions_mut().insert(CurrentUser(user));
    req.extensions_mut().insert(st.sessions.cookie_policy());

    next.run(req).await
}
