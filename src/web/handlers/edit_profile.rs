//! Profile editing handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Response};
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::context::{Layout, WebContext};
use crate::web::forms::{EditProfileForm, FormErrors};

/// Template for the profile editor.
#[derive(Template, WebTemplate)]
#[template(path = "edit_profile.html")]
pub struct EditProfileTemplate {
    pub title: String,
    pub layout: Layout,
    pub csrf_token: String,
    pub username: String,
    pub about_me: String,
    pub errors: FormErrors,
}

impl EditProfileTemplate {
    fn new(ctx: &WebContext, username: String, about_me: String, errors: FormErrors) -> Self {
        Self {
            title: "Edit Profile".to_string(),
            layout: ctx.layout(),
            csrf_token: ctx.csrf_token(),
            username,
            about_me,
            errors,
        }
    }
}

/// Renders the profile editor pre-filled with the current values.
///
/// # Endpoint
///
/// `GET /edit_profile` (login required)
pub async fn edit_profile_page(ctx: WebContext) -> Result<Response, AppError> {
    let user = ctx.require_user()?;

    Ok(ctx.render(EditProfileTemplate::new(
        &ctx,
        user.username.clone(),
        user.about_me.clone().unwrap_or_default(),
        FormErrors::default(),
    )))
}

/// Saves profile changes.
///
/// # Endpoint
///
/// `POST /edit_profile` (login required)
///
/// On success flashes "Your changes have been saved." and redirects back to
/// the editor. Invalid input or a username taken by someone else renders the
/// form again with the submitted values.
pub async fn edit_profile_submit(
    State(state): State<AppState>,
    ctx: WebContext,
    Form(form): Form<EditProfileForm>,
) -> Result<Response, AppError> {
    let user = ctx.require_user()?;
    ctx.verify_csrf(&form.csrf_token)?;

    let mut errors = match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(e) => FormErrors::from(&e),
    };

    if errors.is_empty() {
        match state.user_service.update_profile(user, form.to_update()).await {
            Ok(updated) => {
                tracing::info!(user_id = updated.id, "profile updated");
                return Ok(ctx.redirect_with_flash(
                    "/edit_profile",
                    "Your changes have been saved.",
                ));
            }
            Err(e) => errors.absorb(e)?,
        }
    }

    Ok(ctx.render(EditProfileTemplate::new(
        &ctx,
        form.username,
        form.about_me.unwrap_or_default(),
        errors,
    )))
}
