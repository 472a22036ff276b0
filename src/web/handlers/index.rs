//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::Response;

use crate::error::AppError;
use crate::web::context::{Layout, WebContext};
use crate::web::views::PostView;

/// Template for the home page.
///
/// Renders `templates/index.html` with a greeting and the feed.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub layout: Layout,
    pub username: String,
    pub posts: Vec<PostView>,
}

/// Posts shown on the home page until posting exists.
fn sample_posts() -> Vec<PostView> {
    vec![
        PostView::new("susan", "How do you do fellow kids"),
        PostView::new("Mary", "YEEET"),
    ]
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /` and `GET /index` (login required)
pub async fn index_handler(ctx: WebContext) -> Result<Response, AppError> {
    let user = ctx.require_user()?;

    Ok(ctx.render(IndexTemplate {
        title: "Home".to_string(),
        layout: ctx.layout(),
        username: user.username.clone(),
        posts: sample_posts(),
    }))
}
