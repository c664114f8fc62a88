//! Synchronous field validation run before any network call.
//! The first failing field wins.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::models::{LoginForm, SignUpForm};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Whether `email` has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Checks email, then password.
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    if !validate_email(&form.email) {
        return Err(ValidationError::Email);
    }
    if form.password.is_empty() {
        return Err(ValidationError::Password);
    }
    Ok(())
}

/// Checks full name, then email, then password.
pub fn validate_sign_up(form: &SignUpForm) -> Result<(), ValidationError> {
    if form.full_name.is_empty() {
        return Err(ValidationError::FullName);
    }
    if !validate_email(&form.email) {
        return Err(ValidationError::Email);
    }
    if form.password.is_empty() {
        return Err(ValidationError::Password);
    }
    Ok(())
}
