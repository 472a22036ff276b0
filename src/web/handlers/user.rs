//! Public profile page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::{Layout, WebContext};
use crate::web::views::{PostView, format_timestamp};

/// Template for a user's profile page.
///
/// Renders `templates/user.html` with the avatar, "about me", last-seen time
/// and the user's posts.
#[derive(Template, WebTemplate)]
#[template(path = "user.html")]
pub struct UserTemplate {
    pub title: String,
    pub layout: Layout,
    pub username: String,
    pub avatar: String,
    pub about_me: Option<String>,
    pub last_seen: String,
    pub is_self: bool,
    pub posts: Vec<PostView>,
}

/// Renders the profile page of `username`.
///
/// # Endpoint
///
/// `GET /user/{username}` (login required)
///
/// # Errors
///
/// Returns the 404 page when no such user exists.
pub async fn user_handler(
    State(state): State<AppState>,
    ctx: WebContext,
    Path(username): Path<String>,
) -> Result<Response, AppError> {
    let current = ctx.require_user()?;
    let user = match state.user_service.get_by_username(&username).await {
        Ok(user) => user,
        Err(e @ AppError::NotFound { .. }) => return Ok(ctx.render_error(e)),
        Err(e) => return Err(e),
    };

    let posts = vec![
        PostView::by(&user, "Test post #1"),
        PostView::by(&user, "Test post #2"),
    ];

    Ok(ctx.render(UserTemplate {
        title: user.username.clone(),
        layout: ctx.layout(),
        avatar: user.avatar(128),
        about_me: user.about_me.clone(),
        last_seen: format_timestamp(&user.last_seen),
        is_self: current.id == user.id,
        username: user.username,
        posts,
    }))
}
