//! Order entity.
//!
//! # Invariants
//! - `user_id` references an existing user.
//! - `order_date` is stored and returned in UTC.

use super::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type OrderId = i64;

/// A customer order. Products are linked through the `order_product` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub user_id: UserId,
}

/// Validated field set for creating or fully replacing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// `None` means "now" at the moment the order is written.
    pub order_date: Option<DateTime<Utc>>,
    pub user_id: UserId,
}

impl NewOrder {
    pub fn new(user_id: UserId) -> Self {
        Self {
            order_date: None,
            user_id,
        }
    }

    pub fn with_date(mut self, order_date: DateTime<Utc>) -> Self {
        self.order_date = Some(order_date);
        self
    }

    /// Resolves the defaulted date against `now`.
    pub fn resolve_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.order_date.unwrap_or(now)
    }
}
