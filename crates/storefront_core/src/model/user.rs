//! User entity.
//!
//! # Invariants
//! - `email` is unique across all users (enforced by the store).
//! - `name` and `email` are at most 100 characters, `address` at most 200.

use super::{check_max_chars, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub type UserId = i64;

pub const USER_NAME_MAX_CHARS: usize = 100;
pub const USER_ADDRESS_MAX_CHARS: usize = 200;
pub const USER_EMAIL_MAX_CHARS: usize = 100;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Records the email shape violation on `field`; returns whether `value` passed.
pub(crate) fn check_email(errors: &mut ValidationError, field: &str, value: &str) -> bool {
    let valid = is_valid_email(value);
    if !valid {
        errors.add(field, "Not a valid email address.");
    }
    valid
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

/// Validated field set for creating or fully replacing a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub address: Option<String>,
    pub email: String,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        address: Option<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            email: email.into(),
        }
    }

    /// Checks length limits and email shape.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        check_max_chars(&mut errors, "name", &self.name, USER_NAME_MAX_CHARS);
        if let Some(address) = self.address.as_deref() {
            check_max_chars(&mut errors, "address", address, USER_ADDRESS_MAX_CHARS);
        }
        check_max_chars(&mut errors, "email", &self.email, USER_EMAIL_MAX_CHARS);
        check_email(&mut errors, "email", &self.email);
        errors.into_result()
    }

    /// Materializes the stored entity once the store assigned an id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            address: self.address,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NewUser;

    #[test]
    fn validate_accepts_missing_address() {
        let user = NewUser::new("Ada", None, "ada@example.com");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn validate_reports_every_violated_field() {
        let user = NewUser::new("n".repeat(101), Some("a".repeat(201)), "not-an-email");
        let error = user.validate().unwrap_err();
        assert_eq!(
            error.messages("name").unwrap(),
            ["Longer than maximum length 100."]
        );
        assert_eq!(
            error.messages("address").unwrap(),
            ["Longer than maximum length 200."]
        );
        assert_eq!(
            error.messages("email").unwrap(),
            ["Not a valid email address."]
        );
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let user = NewUser::new("é".repeat(100), None, "e@example.com");
        assert!(user.validate().is_ok());
    }
}
