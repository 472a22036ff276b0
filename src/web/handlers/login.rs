//! Login page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::next_url::safe_next;
use crate::web::context::{Layout, WebContext};
use crate::web::flash;
use crate::web::forms::{FormErrors, LoginForm, LoginQuery};
use crate::web::middleware::web_auth::login_url;

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Username / password inputs and a "remember me" checkbox
/// - Field errors from the last submission
/// - A link to the registration page
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: String,
    pub layout: Layout,
    pub csrf_token: String,
    pub action: String,
    pub username: String,
    pub remember_me: bool,
    pub errors: FormErrors,
}

impl LoginTemplate {
    fn new(ctx: &WebContext, query: &LoginQuery) -> Self {
        Self {
            title: "Sign In".to_string(),
            layout: ctx.layout(),
            csrf_token: ctx.csrf_token(),
            action: form_action(query),
            username: String::new(),
            remember_me: false,
            errors: FormErrors::default(),
        }
    }
}

/// The form posts back to the same URL so `next` survives the submission.
fn form_action(query: &LoginQuery) -> String {
    match query.next.as_deref() {
        Some(next) if !next.is_empty() => login_url(next),
        _ => "/login".to_string(),
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login[?next=/path]`
///
/// Signed-in users are sent to `/index` instead.
pub async fn login_page(ctx: WebContext, Query(query): Query<LoginQuery>) -> Response {
    if ctx.user().is_some() {
        return Redirect::to("/index").into_response();
    }

    ctx.render(LoginTemplate::new(&ctx, &query))
}

/// Processes a login attempt.
///
/// # Endpoint
///
/// `POST /login[?next=/path]`
///
/// # Outcomes
///
/// - Invalid form: the page is rendered again with field errors
/// - Unknown user or wrong password: flash "Invalid username or password"
///   and redirect to `/login`
/// - Success: a session cookie is set (persistent when "remember me" is
///   checked) and the user is redirected to `next` when it is a local path,
///   otherwise to `/index`
///
/// # Errors
///
/// Returns `400 Bad Request` when the CSRF token is missing or wrong.
pub async fn login_submit(
    State(state): State<AppState>,
    ctx: WebContext,
    Query(query): Query<LoginQuery>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if ctx.user().is_some() {
        return Ok(Redirect::to("/index").into_response());
    }

    ctx.verify_csrf(&form.csrf_token)?;

    if let Err(errors) = form.validate() {
        return Ok(ctx.render(LoginTemplate {
            username: form.username.clone(),
            remember_me: form.remember(),
            errors: FormErrors::from(&errors),
            ..LoginTemplate::new(&ctx, &query)
        }));
    }

    let user = match state
        .user_service
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AppError::Unauthorized { message, .. }) => {
            return Ok(ctx.redirect_with_flash("/login", &message));
        }
        Err(e) => return Err(e),
    };

    let target = query
        .next
        .as_deref()
        .and_then(safe_next)
        .unwrap_or_else(|| "/index".to_string());

    tracing::info!(user_id = user.id, remember = form.remember(), "user logged in");

    Ok(flash::redirect_with_cookies(
        &target,
        vec![state.sessions.issue(user.id, form.remember())],
    ))
}
