//! Product entity.

use super::{check_max_chars, ValidationError};
use serde::{Deserialize, Serialize};

pub type ProductId = i64;

pub const PRODUCT_NAME_MAX_CHARS: usize = 100;

/// An item that can be placed in orders.
///
/// `price` is a plain float with no currency precision guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub price: f64,
}

/// Validated field set for creating or fully replacing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: String,
    pub price: f64,
}

impl NewProduct {
    pub fn new(product_name: impl Into<String>, price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            price,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::new();
        check_max_chars(
            &mut errors,
            "product_name",
            &self.product_name,
            PRODUCT_NAME_MAX_CHARS,
        );
        if !self.price.is_finite() {
            errors.add(
                "price",
                "Special numeric values (nan or infinity) are not permitted.",
            );
        }
        errors.into_result()
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            product_name: self.product_name,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NewProduct;

    #[test]
    fn validate_rejects_non_finite_price() {
        let error = NewProduct::new("Lamp", f64::INFINITY)
            .validate()
            .unwrap_err();
        assert!(error.messages("price").is_some());
    }

    #[test]
    fn validate_rejects_long_name() {
        let error = NewProduct::new("x".repeat(101), 1.0).validate().unwrap_err();
        assert_eq!(error.fields().collect::<Vec<_>>(), ["product_name"]);
    }
}
