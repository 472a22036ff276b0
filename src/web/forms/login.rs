//! Sign-in form.

use serde::Deserialize;
use validator::Validate;

/// `POST /login` body.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "This field is required."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,

    /// Checkbox; browsers omit it when unchecked.
    pub remember_me: Option<String>,

    pub csrf_token: String,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        self.remember_me.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}
