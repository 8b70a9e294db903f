//! Storefront domain model: users, products, orders.
//!
//! # Responsibility
//! - Define the persisted entity shapes and their validated write payloads.
//! - Own field-level constraints shared by the schema and repository layers.
//!
//! # Invariants
//! - Entity ids are surrogate keys generated by the store.
//! - Write payloads pass `validate()` before any SQL mutation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderId};
pub use product::{NewProduct, Product, ProductId};
pub use user::{NewUser, User, UserId};

/// Entity families exposed by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Product,
    Order,
}

impl EntityKind {
    /// Capitalized label used in client-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Product => "Product",
            Self::Order => "Order",
        }
    }

    /// Lowercase label used in log events and confirmations.
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Product => "product",
            Self::Order => "order",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Field-level validation failure.
///
/// Collects every violated field with one or more human-readable messages.
/// Serializes as a flat `{"field": ["message", ..]}` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationError {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an error carrying one message for one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut error = Self::new();
        error.add(field, message);
        error
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn messages(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid fields:")?;
        for (field, messages) in &self.fields {
            write!(f, " {field} ({})", messages.join(" "))?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

pub(crate) fn check_max_chars(
    errors: &mut ValidationError,
    field: &str,
    value: &str,
    max_chars: usize,
) {
    if value.chars().count() > max_chars {
        errors.add(field, format!("Longer than maximum length {max_chars}."));
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, ValidationError};

    #[test]
    fn validation_error_serializes_as_flat_field_map() {
        let mut error = ValidationError::new();
        error.add("name", "Missing data for required field.");
        error.add("email", "Not a valid string.");
        error.add("email", "Longer than maximum length 100.");

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": ["Not a valid string.", "Longer than maximum length 100."],
                "name": ["Missing data for required field."],
            })
        );
    }

    #[test]
    fn empty_validation_error_converts_to_ok() {
        assert!(ValidationError::new().into_result().is_ok());
        assert!(ValidationError::single("price", "Not a valid number.")
            .into_result()
            .is_err());
    }

    #[test]
    fn entity_kind_labels() {
        assert_eq!(EntityKind::Product.label(), "Product");
        assert_eq!(EntityKind::Order.to_string(), "order");
    }
}
