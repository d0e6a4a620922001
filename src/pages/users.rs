use cms_http::ApiError;
use cms_kernel::models::{User, UserPayload, UserUpdate};
use cms_kernel::UserResource;
use cms_overlay::Element;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{submit_buttons, FieldErrors, PageCopy, ResourceForm};
use crate::utils::non_blank;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub email: String,
    pub name: String,
    /// Only sent when non-blank.
    #[serde(skip_serializing)]
    pub password: String,
}

impl ResourceForm for UserForm {
    type Kind = UserResource;

    const COPY: PageCopy = PageCopy {
        create_title: "Add New User",
        edit_title: "Edit User",
        created: "User created successfully!",
        updated: "User updated successfully!",
        deleted: "User deleted successfully!",
        delete_prompt: "Are you sure you want to delete this user?",
        load_failed: "Failed to fetch users. Please try again.",
        save_failed: "Failed to save user. Please try again.",
        delete_failed: "Failed to delete user. Please try again.",
    };

    fn from_entity(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.insert("email", "Email is required".to_string());
        } else if !EMAIL_RE.is_match(email) {
            errors.insert("email", "Email is invalid".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn to_create(&self) -> UserPayload {
        UserPayload {
            email: self.email.trim().to_string(),
            name: non_blank(&self.name),
            password: non_blank(&self.password),
            ..Default::default()
        }
    }

    fn to_update(&self) -> UserUpdate {
        UserUpdate {
            email: Some(self.email.trim().to_string()),
            name: Some(self.name.trim().to_string()),
            password: non_blank(&self.password),
            ..Default::default()
        }
    }

    /// The API answers a duplicate email with 400.
    fn map_error(err: &ApiError) -> Option<FieldErrors> {
        if !err.is_bad_request() {
            return None;
        }
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email already exists".to_string());
        Some(errors)
    }

    fn elements(&self) -> Vec<Element> {
        let mut elements = vec![
            Element::input("email"),
            Element::input("name"),
            Element::input("password"),
        ];
        elements.extend(submit_buttons());
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str) -> UserForm {
        UserForm {
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn email_is_required_and_checked() {
        assert_eq!(
            form("  ").validate().unwrap_err()["email"],
            "Email is required"
        );
        assert_eq!(
            form("not-an-email").validate().unwrap_err()["email"],
            "Email is invalid"
        );
        assert!(form("a@b.com").validate().is_ok());
    }

    #[test]
    fn bad_request_maps_to_email_field() {
        let err = ApiError::Server {
            status: 400,
            detail: Some("Email already registered".into()),
        };
        let errors = UserForm::map_error(&err).unwrap();
        assert_eq!(errors["email"], "Email already exists");

        let err = ApiError::Server {
            status: 500,
            detail: None,
        };
        assert!(UserForm::map_error(&err).is_none());
    }

    #[test]
    fn blank_optional_fields_are_omitted() {
        let payload = UserForm {
            email: " a@b.com ".into(),
            name: " ".into(),
            password: String::new(),
        }
        .to_create();
        assert_eq!(payload.email, "a@b.com");
        assert_eq!(payload.name, None);
        assert_eq!(payload.password, None);
    }
}
