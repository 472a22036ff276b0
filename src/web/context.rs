//! Per-request page context: the signed-in user, pending flash messages and
//! the CSRF token for forms.

use axum::extract::FromRequestParts;
use axum::http::header::SET_COOKIE;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::convert::Infallible;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::web::cookies::{CookiePolicy, read_cookie};
use crate::web::{csrf, flash};

/// Data every page shares through `base.html`.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub current_username: Option<String>,
    pub flashes: Vec<String>,
}

/// The user resolved from the session cookie, if any.
///
/// Inserted into request extensions by [`crate::web::middleware::session::layer`];
/// absent extensions read as anonymous.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Everything a page handler needs besides its own data.
pub struct WebContext {
    current_user: Option<User>,
    flashes: Vec<String>,
    csrf_cookie: Option<String>,
    csrf_token: String,
    cookies: CookiePolicy,
}

impl<S> FromRequestParts<S> for WebContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(current_user) = CurrentUser::from_request_parts(parts, state).await?;
        let flashes = flash::take(&parts.headers);
        let csrf_cookie = read_cookie(&parts.headers, csrf::CSRF_COOKIE);
        let csrf_token = csrf_cookie.clone().unwrap_or_else(csrf::generate_token);
        let cookies = parts
            .extensions
            .get::<CookiePolicy>()
            .copied()
            .unwrap_or_default();

        Ok(Self {
            current_user,
            flashes,
            csrf_cookie,
            csrf_token,
            cookies,
        })
    }
}

impl WebContext {
    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The signed-in user on a login-protected route.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when the route was reached without
    /// the login middleware having admitted a user.
    pub fn require_user(&self) -> Result<&User, AppError> {
        self.current_user
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("Login required", json!({})))
    }

    pub fn layout(&self) -> Layout {
        Layout {
            current_username: self.current_user.as_ref().map(|u| u.username.clone()),
            flashes: self.flashes.clone(),
        }
    }

    pub fn csrf_token(&self) -> String {
        self.csrf_token.clone()
    }

    /// Checks the token a form echoed back.
    pub fn verify_csrf(&self, submitted: &str) -> Result<(), AppError> {
        csrf::verify(self.csrf_cookie.as_deref(), submitted)
    }

    /// Renders an error page for this visitor, showing and clearing pending
    /// flash messages like any other page.
    pub fn render_error(&self, err: AppError) -> Response {
        self.render(err.into_page(self.layout()))
    }

    /// Redirects and shows `message` on the next rendered page.
    pub fn redirect_with_flash(&self, to: &str, message: &str) -> Response {
        flash::redirect_with_flash(self.cookies, to, message)
    }

    /// Turns a page into a response, clearing displayed flash messages and
    /// storing a newly issued CSRF token.
    pub fn render(&self, page: impl IntoResponse) -> Response {
        let mut response = page.into_response();

        let mut cookies = Vec::new();
        if !self.flashes.is_empty() {
            cookies.push(flash::clear(self.cookies));
        }
        if self.csrf_cookie.is_none() {
            cookies.push(self.cookies.set(csrf::CSRF_COOKIE, &self.csrf_token));
        }

        for cookie in cookies {
            if let Ok(value) = cookie.parse() {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }

        response
    }
}
