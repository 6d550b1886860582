//! Declarative form constraints for registration and article editing.
//!
//! Validation is pure: the same checks run on the pre-populated GET
//! render and on POST submission, and failures come back as a
//! field-name → messages map for inline display.

use std::collections::BTreeMap;

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(min = 4, max = 25, message = "Username must be 4-25 characters"))]
    pub username: String,
    #[validate(length(min = 6, max = 50, message = "Email must be 6-50 characters"))]
    pub email: String,
    #[validate(
        length(min = 1, message = "Password is required"),
        must_match(other = "confirm", message = "Passwords do not match")
    )]
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArticleForm {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "Ukrainian title must be 1-200 characters"))]
    pub title_uk: String,
    #[validate(length(min = 20, message = "Body must be at least 20 characters"))]
    pub body: String,
    #[validate(length(min = 20, message = "Ukrainian body must be at least 20 characters"))]
    pub body_uk: String,
}

/// Flatten [`ValidationErrors`] into per-field message lists, ordered by
/// field name so re-renders are stable.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            name: "Alice Example".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "alicepw".to_string(),
            confirm: "alicepw".to_string(),
        }
    }

    fn article_form() -> ArticleForm {
        ArticleForm {
            title: "First post".to_string(),
            title_uk: "Перший запис".to_string(),
            body: "a body comfortably over twenty characters".to_string(),
            body_uk: "текст довший за двадцять символів".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(register_form().validate().is_ok());
    }

    #[test]
    fn password_mismatch_fails_on_password_field() {
        let mut form = register_form();
        form.confirm = "different".to_string();
        let errors = form.validate().expect_err("mismatch must fail");
        let map = field_errors(&errors);
        assert!(map.contains_key("password"));
        assert!(map["password"].iter().any(|m| m.contains("do not match")));
    }

    #[test]
    fn empty_password_is_required() {
        let mut form = register_form();
        form.password = String::new();
        form.confirm = String::new();
        let errors = form.validate().expect_err("empty password must fail");
        assert!(field_errors(&errors).contains_key("password"));
    }

    #[test]
    fn username_length_bounds() {
        let mut form = register_form();
        form.username = "abc".to_string();
        assert!(form.validate().is_err());
        form.username = "a".repeat(26);
        assert!(form.validate().is_err());
        form.username = "abcd".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn valid_article_passes() {
        assert!(article_form().validate().is_ok());
    }

    #[test]
    fn short_body_fails_either_locale() {
        let mut form = article_form();
        form.body = "too short".to_string();
        let errors = form.validate().expect_err("short body must fail");
        assert!(field_errors(&errors).contains_key("body"));

        let mut form = article_form();
        form.body_uk = "коротко".to_string();
        let errors = form.validate().expect_err("short body_uk must fail");
        assert!(field_errors(&errors).contains_key("body_uk"));
    }

    #[test]
    fn empty_title_fails() {
        let mut form = article_form();
        form.title = String::new();
        assert!(form.validate().is_err());
    }
}
