//! Order repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist orders and their product links (`order_product`).
//! - Answer the nested reads: orders of a user, products of an order.
//!
//! # Invariants
//! - `(order_id, product_id)` pairs are unique; a second insert is `LinkExists`.
//! - `order_date` is stored as RFC 3339 UTC text.
//! - Deleting an order drops its product links (cascade).

use crate::model::{
    EntityKind, NewOrder, Order, OrderId, Product, ProductId, UserId, ValidationError,
};
use crate::repo::product_repo::parse_product_row;
use crate::repo::{constraint_violation, Constraint, RepoError, RepoResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};

const ORDER_SELECT_SQL: &str = "SELECT id, order_date, user_id FROM orders";

/// Repository interface for orders and order/product links.
pub trait OrderRepository {
    fn list_orders(&self) -> RepoResult<Vec<Order>>;
    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>>;
    /// Inserts an order; a missing `order_date` is stamped with the current UTC time.
    fn create_order(&self, order: &NewOrder) -> RepoResult<Order>;
    /// Replaces `user_id`, and `order_date` when one is given.
    fn update_order(&self, id: OrderId, order: &NewOrder) -> RepoResult<Order>;
    fn delete_order(&self, id: OrderId) -> RepoResult<()>;
    fn list_orders_for_user(&self, user_id: UserId) -> RepoResult<Vec<Order>>;
    fn list_products_for_order(&self, order_id: OrderId) -> RepoResult<Vec<Product>>;
    fn has_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<bool>;
    fn add_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<()>;
    fn remove_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<()>;
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_orders(&self, sql: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Order>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next()? {
            orders.push(parse_order_row(row)?);
        }
        Ok(orders)
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn list_orders(&self) -> RepoResult<Vec<Order>> {
        self.query_orders(&format!("{ORDER_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let mut orders =
            self.query_orders(&format!("{ORDER_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(orders.pop())
    }

    fn create_order(&self, order: &NewOrder) -> RepoResult<Order> {
        let order_date = order.resolve_date(Utc::now());

        self.conn
            .execute(
                "INSERT INTO orders (order_date, user_id) VALUES (?1, ?2);",
                params![format_order_date(order_date), order.user_id],
            )
            .map_err(|err| map_order_write_error(err, order.user_id))?;

        Ok(Order {
            id: self.conn.last_insert_rowid(),
            order_date,
            user_id: order.user_id,
        })
    }

    fn update_order(&self, id: OrderId, order: &NewOrder) -> RepoResult<Order> {
        let changed = self
            .conn
            .execute(
                "UPDATE orders
                 SET
                    order_date = COALESCE(?1, order_date),
                    user_id = ?2
                 WHERE id = ?3;",
                params![order.order_date.map(format_order_date), order.user_id, id],
            )
            .map_err(|err| map_order_write_error(err, order.user_id))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Order,
                id,
            });
        }

        self.get_order(id)?.ok_or(RepoError::NotFound {
            kind: EntityKind::Order,
            id,
        })
    }

    fn delete_order(&self, id: OrderId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM orders WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::Order,
                id,
            });
        }

        Ok(())
    }

    fn list_orders_for_user(&self, user_id: UserId) -> RepoResult<Vec<Order>> {
        self.query_orders(
            &format!("{ORDER_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"),
            [user_id],
        )
    }

    fn list_products_for_order(&self, order_id: OrderId) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.product_name, p.price
             FROM order_product op
             INNER JOIN products p ON p.id = op.product_id
             WHERE op.order_id = ?1
             ORDER BY p.id ASC;",
        )?;
        let products = stmt
            .query_map([order_id], parse_product_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(products)
    }

    fn has_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM order_product
                WHERE order_id = ?1 AND product_id = ?2
            );",
            [order_id, product_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn add_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO order_product (order_id, product_id) VALUES (?1, ?2);",
                [order_id, product_id],
            )
            .map_err(|err| match constraint_violation(&err) {
                Some(Constraint::PrimaryKey | Constraint::Unique) => RepoError::LinkExists {
                    order_id,
                    product_id,
                },
                _ => err.into(),
            })?;
        Ok(())
    }

    fn remove_product(&self, order_id: OrderId, product_id: ProductId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM order_product WHERE order_id = ?1 AND product_id = ?2;",
            [order_id, product_id],
        )?;

        if changed == 0 {
            return Err(RepoError::LinkMissing {
                order_id,
                product_id,
            });
        }

        Ok(())
    }
}

fn parse_order_row(row: &Row<'_>) -> RepoResult<Order> {
    let date_text: String = row.get("order_date")?;
    let order_date = DateTime::parse_from_rfc3339(&date_text)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{date_text}` in orders.order_date"
            ))
        })?;

    Ok(Order {
        id: row.get("id")?,
        order_date,
        user_id: row.get("user_id")?,
    })
}

fn format_order_date(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn map_order_write_error(err: rusqlite::Error, user_id: UserId) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::ForeignKey) => RepoError::Validation(ValidationError::single(
            "user_id",
            format!("User {user_id} does not exist."),
        )),
        _ => err.into(),
    }
}
