//! Registration form.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::RegisterInput;
use crate::web::forms::validate_username;

/// `POST /register` body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegistrationForm {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(
        length(min = 1, max = 120, message = "Enter an email address of at most 120 characters."),
        email(message = "Invalid email address.")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "This field is required."))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Field must be equal to password."))]
    pub password2: String,

    pub csrf_token: String,
}

impl From<RegistrationForm> for RegisterInput {
    fn from(form: RegistrationForm) -> Self {
        RegisterInput {
            username: form.username,
            email: form.email,
            password: form.password,
        }
    }
}
