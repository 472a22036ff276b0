//! HTML form payloads and their validation.
//!
//! Forms are deserialized with `axum::Form` and validated with `validator`.
//! Every field defaults to empty so that a missing field reports a
//! validation message instead of rejecting the request outright.

pub mod edit_profile;
pub mod login;
pub mod register;

pub use edit_profile::EditProfileForm;
pub use login::{LoginForm, LoginQuery};
pub use register::RegistrationForm;

use regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;

pub const REQUIRED: &str = "This field is required.";

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Username rules shared by registration and profile editing.
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let message = if value.is_empty() {
        REQUIRED
    } else if value.chars().count() > 64 {
        "Field cannot be longer than 64 characters."
    } else if !USERNAME_REGEX.is_match(value) {
        "Usernames may only contain letters, numbers, dots, dashes and underscores."
    } else {
        return Ok(());
    };

    Err(ValidationError::new("username").with_message(Cow::Borrowed(message)))
}

/// Error messages keyed by form field, rendered next to each input.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field; empty when the field is valid.
    pub fn field(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attaches a service error to the field it names.
    ///
    /// Errors that do not name a field are handed back to the caller.
    pub fn absorb(&mut self, err: AppError) -> Result<(), AppError> {
        match err.field() {
            Some(field) => {
                let field = field.to_string();
                self.push(&field, err.to_string());
                Ok(())
            }
            None => Err(err),
        }
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            let field = field.to_string();
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value.".to_string());
                out.push(&field, message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("susan").is_ok());
        assert!(validate_username("mary.j-2_b").is_ok());

        let err = validate_username("  ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some(REQUIRED));

        assert!(validate_username("has space").is_err());
        assert!(validate_username("slash/name").is_err());
        assert!(validate_username(&"a".repeat(65)).is_err());
        assert!(validate_username(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_form_errors_field_lookup() {
        let mut errors = FormErrors::default();
        assert!(errors.is_empty());
        assert!(errors.field("username").is_empty());

        errors.push("username", "Please use a different username.");
        assert!(!errors.is_empty());
        assert_eq!(errors.field("username"), ["Please use a different username."]);
        assert!(errors.field("email").is_empty());
    }

    #[test]
    fn test_absorb_field_conflict() {
        let mut errors = FormErrors::default();

        let leftover = errors.absorb(AppError::conflict(
            "Please use a different email address.",
            json!({ "field": "email" }),
        ));
        assert!(leftover.is_ok());
        assert_eq!(errors.field("email"), ["Please use a different email address."]);

        let leftover = errors.absorb(AppError::internal("Database error", json!({})));
        assert!(leftover.is_err());
    }
}
