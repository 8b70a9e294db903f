//! Validation/serialization schemas for inbound JSON payloads.
//!
//! # Responsibility
//! - Turn a raw JSON body into a validated write payload (`NewUser`, ..).
//! - Report every violated field with a human-readable message.
//!
//! # Invariants
//! - A successful `load` always yields a payload that passes `validate()`.
//! - `id` is tolerated in bodies and ignored; other undeclared keys are errors.
//!
//! Outbound serialization is the entities' own `serde::Serialize` impl.

use crate::model::product::PRODUCT_NAME_MAX_CHARS;
use crate::model::user::{
    check_email, USER_ADDRESS_MAX_CHARS, USER_EMAIL_MAX_CHARS, USER_NAME_MAX_CHARS,
};
use crate::model::{NewOrder, NewProduct, NewUser, ValidationError};
use serde_json::{Map, Value};

mod fields;

use fields::{
    optional_datetime, optional_string, reject_unknown, required_float, required_integer,
    required_string,
};

/// Key used for errors that concern the whole body rather than one field.
pub const SCHEMA_ERROR_KEY: &str = "_schema";

/// Declarative loader from JSON into a validated payload.
pub trait Schema {
    type Payload;

    /// Keys this schema understands, including the ignored `id`.
    const FIELDS: &'static [&'static str];

    /// Reads the payload out of an already-checked JSON object.
    fn load_object(
        map: &Map<String, Value>,
        errors: &mut ValidationError,
    ) -> Option<Self::Payload>;

    /// Validates `value` and returns the payload, or every field violation.
    fn load(value: &Value) -> Result<Self::Payload, ValidationError> {
        let Value::Object(map) = value else {
            return Err(ValidationError::single(
                SCHEMA_ERROR_KEY,
                "Invalid input type.",
            ));
        };

        let mut errors = ValidationError::new();
        reject_unknown(map, Self::FIELDS, &mut errors);
        let payload = Self::load_object(map, &mut errors);

        match payload {
            Some(payload) if errors.is_empty() => Ok(payload),
            _ => Err(errors),
        }
    }

    /// Parses raw request bytes, then loads them.
    fn load_bytes(body: &[u8]) -> Result<Self::Payload, ValidationError> {
        let value = parse_json_body(body)?;
        Self::load(&value)
    }
}

/// Parses a request body as JSON, mapping syntax errors to a schema error.
pub fn parse_json_body(body: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(body)
        .map_err(|_| ValidationError::single(SCHEMA_ERROR_KEY, "Invalid JSON body."))
}

/// Schema for `User` bodies.
pub struct UserSchema;

impl Schema for UserSchema {
    type Payload = NewUser;
    const FIELDS: &'static [&'static str] = &["id", "name", "address", "email"];

    fn load_object(map: &Map<String, Value>, errors: &mut ValidationError) -> Option<NewUser> {
        let name = required_string(map, "name", USER_NAME_MAX_CHARS, errors);
        let address = optional_string(map, "address", USER_ADDRESS_MAX_CHARS, errors);
        let email = required_string(map, "email", USER_EMAIL_MAX_CHARS, errors)
            .filter(|email| check_email(errors, "email", email));

        Some(NewUser::new(name?, address, email?))
    }
}

/// Schema for `Product` bodies.
pub struct ProductSchema;

impl Schema for ProductSchema {
    type Payload = NewProduct;
    const FIELDS: &'static [&'static str] = &["id", "product_name", "price"];

    fn load_object(map: &Map<String, Value>, errors: &mut ValidationError) -> Option<NewProduct> {
        let product_name = required_string(map, "product_name", PRODUCT_NAME_MAX_CHARS, errors);
        let price = required_float(map, "price", errors);

        Some(NewProduct::new(product_name?, price?))
    }
}

/// Schema for `Order` bodies. `order_date` defaults to creation time.
pub struct OrderSchema;

impl Schema for OrderSchema {
    type Payload = NewOrder;
    const FIELDS: &'static [&'static str] = &["id", "order_date", "user_id"];

    fn load_object(map: &Map<String, Value>, errors: &mut ValidationError) -> Option<NewOrder> {
        let order_date = optional_datetime(map, "order_date", errors);
        let user_id = required_integer(map, "user_id", errors);

        Some(NewOrder {
            order_date,
            user_id: user_id?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{OrderSchema, ProductSchema, Schema, UserSchema, SCHEMA_ERROR_KEY};
    use crate::model::NewUser;
    use serde_json::json;

    #[test]
    fn user_schema_loads_full_payload() {
        let user = UserSchema::load(&json!({
            "name": "Ada",
            "address": "1 Analytical Way",
            "email": "ada@example.com",
        }))
        .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.address.as_deref(), Some("1 Analytical Way"));
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn user_schema_reports_all_missing_fields_at_once() {
        let error = UserSchema::load(&json!({"address": "nowhere"})).unwrap_err();
        assert_eq!(error.fields().collect::<Vec<_>>(), ["email", "name"]);
        assert_eq!(
            error.messages("name").unwrap(),
            ["Missing data for required field."]
        );
    }

    #[test]
    fn user_schema_ignores_id_and_rejects_unknown_keys() {
        let ok = UserSchema::load(&json!({"id": 9, "name": "A", "email": "a@b.io"}));
        assert!(ok.is_ok());

        let error =
            UserSchema::load(&json!({"name": "A", "email": "a@b.io", "role": "admin"})).unwrap_err();
        assert_eq!(error.messages("role").unwrap(), ["Unknown field."]);
    }

    #[test]
    fn user_schema_checks_types_lengths_and_email_shape() {
        let error = UserSchema::load(&json!({
            "name": 42,
            "address": "a".repeat(201),
            "email": "nope",
        }))
        .unwrap_err();
        assert_eq!(error.messages("name").unwrap(), ["Not a valid string."]);
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
    fn email_rule_matches_payload_validation() {
        let body = json!({"name": "Ada", "email": "ada.example.com"});
        let from_schema = UserSchema::load(&body).unwrap_err();
        let from_model = NewUser::new("Ada", None, "ada.example.com")
            .validate()
            .unwrap_err();

        assert_eq!(from_schema.messages("email"), from_model.messages("email"));
        assert_eq!(
            from_schema.messages("email").unwrap(),
            ["Not a valid email address."]
        );
    }

    #[test]
    fn null_required_field_is_rejected() {
        let error = ProductSchema::load(&json!({"product_name": null, "price": 3})).unwrap_err();
        assert_eq!(
            error.messages("product_name").unwrap(),
            ["Field may not be null."]
        );
    }

    #[test]
    fn non_object_body_is_a_schema_error() {
        let error = ProductSchema::load(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            error.messages(SCHEMA_ERROR_KEY).unwrap(),
            ["Invalid input type."]
        );

        let error = ProductSchema::load_bytes(b"{not json").unwrap_err();
        assert_eq!(
            error.messages(SCHEMA_ERROR_KEY).unwrap(),
            ["Invalid JSON body."]
        );
    }

    #[test]
    fn order_schema_uses_payload_fields_and_defaults_date() {
        let order = OrderSchema::load(&json!({"user_id": 3})).unwrap();
        assert_eq!(order.user_id, 3);
        assert!(order.order_date.is_none());

        let error = OrderSchema::load(&json!({"order_date": "yesterday"})).unwrap_err();
        assert_eq!(
            error.messages("order_date").unwrap(),
            ["Not a valid datetime."]
        );
        assert_eq!(
            error.messages("user_id").unwrap(),
            ["Missing data for required field."]
        );
    }
}
