//! Application error type and its HTML rendering.
//!
//! Every fallible operation in the services and repositories returns
//! [`AppError`]. Handlers either recover from specific variants (credential
//! failures, uniqueness conflicts shown as form errors) or let the error
//! propagate, in which case it is rendered as an error page.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::web::context::Layout;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    Unauthorized { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status associated with this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Form field a conflict refers to, if any.
    ///
    /// Uniqueness conflicts carry `{"field": "<name>"}` in their details so
    /// handlers can show the message next to the offending input.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::Conflict { details, .. } | AppError::Validation { details, .. } => {
                details.get("field").and_then(Value::as_str)
            }
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "404.html")]
struct NotFoundTemplate {
    title: String,
    layout: Layout,
}

#[derive(Template)]
#[template(path = "500.html")]
struct InternalErrorTemplate {
    title: String,
    layout: Layout,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: String,
    layout: Layout,
    status: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_page(Layout::default())
    }
}

impl AppError {
    /// Renders the error page inside the given page layout.
    ///
    /// Handlers that know the visitor use this so the navigation bar and
    /// pending flash messages survive the error; plain `IntoResponse`
    /// renders an anonymous layout.
    pub fn into_page(self, layout: Layout) -> Response {
        let status = self.status();

        let rendered = match self {
            AppError::NotFound { .. } => NotFoundTemplate {
                title: "Not Found".to_string(),
                layout,
            }
            .render(),
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "request failed");
                InternalErrorTemplate {
                    title: "Error".to_string(),
                    layout,
                }
                .render()
            }
            AppError::Validation { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Conflict { message, .. } => ErrorTemplate {
                title: "Error".to_string(),
                layout,
                status: status.as_u16(),
                message,
            }
            .render(),
        };

        match rendered {
            Ok(body) => (status, axum::response::Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "failed to render error page");
                (status, status.canonical_reason().unwrap_or("Error")).into_response()
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::internal("Template error", json!({ "reason": e.to_string() }))
    }
}

/// Maps a database error onto the application taxonomy.
///
/// Unique violations on the `users` constraints become conflicts naming the
/// form field that caused them.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return match db.constraint() {
            Some("users_username_key") => AppError::conflict(
                "Please use a different username.",
                json!({ "field": "username" }),
            ),
            Some("users_email_key") => AppError::conflict(
                "Please use a different email address.",
                json!({ "field": "email" }),
            ),
            other => AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": other }),
            ),
        };
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}
