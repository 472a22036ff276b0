//! Fallback for unknown paths.

use axum::http::Uri;
use axum::response::Response;
use serde_json::json;

use crate::error::AppError;
use crate::web::context::WebContext;

/// Renders the 404 page for any unmatched route.
pub async fn not_found_handler(ctx: WebContext, uri: Uri) -> Response {
    ctx.render_error(AppError::not_found(
        "Page not found",
        json!({ "path": uri.path() }),
    ))
}
