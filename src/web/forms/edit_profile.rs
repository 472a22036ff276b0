//! Profile editing form.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::ProfileUpdate;
use crate::web::forms::validate_username;

/// `POST /edit_profile` body.
///
/// An empty "about me" textarea clears the field.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EditProfileForm {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 140, message = "Field cannot be longer than 140 characters."))]
    pub about_me: Option<String>,

    pub csrf_token: String,
}

impl EditProfileForm {
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            username: self.username.clone(),
            about_me: self.about_me.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_me_length_limit() {
        let mut form = EditProfileForm {
            username: "susan".to_string(),
            about_me: Some("a".repeat(140)),
            csrf_token: String::new(),
        };
        assert!(form.validate().is_ok());

        form.about_me = Some("a".repeat(141));
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("about_me"));
    }

    #[test]
    fn test_empty_about_me_is_none() {
        let form: EditProfileForm =
            serde_json::from_value(serde_json::json!({ "username": "susan", "about_me": "" }))
                .unwrap();

        assert_eq!(form.about_me, None);
        assert!(form.validate().is_ok());
        assert_eq!(
            form.to_update(),
            ProfileUpdate {
                username: "susan".to_string(),
                about_me: None
            }
        );
    }

    #[test]
    fn test_username_required() {
        let form = EditProfileForm::default();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }
}
