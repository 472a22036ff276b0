//! Registration page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::{Layout, WebContext};
use crate::web::forms::{FormErrors, RegistrationForm};

/// Template for the registration page.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub title: String,
    pub layout: Layout,
    pub csrf_token: String,
    pub username: String,
    pub email: String,
    pub errors: FormErrors,
}

impl RegisterTemplate {
    fn new(ctx: &WebContext) -> Self {
        Self {
            title: "Register".to_string(),
            layout: ctx.layout(),
            csrf_token: ctx.csrf_token(),
            username: String::new(),
            email: String::new(),
            errors: FormErrors::default(),
        }
    }
}

/// Renders the registration page.
///
/// # Endpoint
///
/// `GET /register`
pub async fn register_page(ctx: WebContext) -> Response {
    if ctx.user().is_some() {
        return Redirect::to("/index").into_response();
    }

    ctx.render(RegisterTemplate::new(&ctx))
}

/// Creates an account.
///
/// # Endpoint
///
/// `POST /register`
///
/// On success flashes a welcome message and redirects to `/login`. Invalid
/// input, including a username or email that is already taken, renders the
/// form again with the submitted values and field errors.
pub async fn register_submit(
    State(state): State<AppState>,
    ctx: WebContext,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    if ctx.user().is_some() {
        return Ok(Redirect::to("/index").into_response());
    }

    ctx.verify_csrf(&form.csrf_token)?;

    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => FormErrors::from(&e),
    };

    if errors.is_empty() {
        match state.user_service.register(form.clone().into()).await {
            Ok(_) => {
                return Ok(ctx.redirect_with_flash(
                    "/login",
                    "Congratulations, you are now a registered user!",
                ));
            }
            Err(e) => errors.absorb(e)?,
        }
    }

    Ok(ctx.render(RegisterTemplate {
        username: form.username,
        email: form.email,
        errors,
        ..RegisterTemplate::new(&ctx)
    }))
}
