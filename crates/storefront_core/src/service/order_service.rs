//! Order use-case service.
//!
//! # Responsibility
//! - Create and replace orders against an existing user.
//! - Manage order/product links and the nested collection reads.
//!
//! # Invariants
//! - Order writes use the validated payload fields only.
//! - Link operations resolve both the order and the product before touching
//!   the link table; either missing is `NotFound`.

use crate::model::{
    EntityKind, NewOrder, Order, OrderId, Product, ProductId, UserId, ValidationError,
};
use crate::repo::order_repo::OrderRepository;
use crate::repo::product_repo::ProductRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;

/// Order service with the user/product lookups it needs.
pub struct OrderService<O, U, P>
where
    O: OrderRepository,
    U: UserRepository,
    P: ProductRepository,
{
    orders: O,
    users: U,
    products: P,
}

impl<O, U, P> OrderService<O, U, P>
where
    O: OrderRepository,
    U: UserRepository,
    P: ProductRepository,
{
    pub fn new(orders: O, users: U, products: P) -> Self {
        Self {
            orders,
            users,
            products,
        }
    }

    pub fn list_orders(&self) -> RepoResult<Vec<Order>> {
        self.orders.list_orders()
    }

    pub fn get_order(&self, id: OrderId) -> RepoResult<Order> {
        self.orders.get_order(id)?.ok_or(RepoError::NotFound {
            kind: EntityKind::Order,
            id,
        })
    }

    /// Creates an order for an existing user.
    ///
    /// An unknown `user_id` is a field-level validation error, not `NotFound`:
    /// the id comes from the body, not the path.
    pub fn create_order(&self, order: &NewOrder) -> RepoResult<Order> {
        self.ensure_user(order.user_id)?;
        let created = self.orders.create_order(order)?;
        info!(
            "event=order_create module=service status=ok order_id={} user_id={}",
            created.id, created.user_id
        );
        Ok(created)
    }

    /// Replaces the owner and, when given, the date of an existing order.
    ///
    /// A missing order is `NotFound` from the repository's changed-row check.
    pub fn update_order(&self, id: OrderId, order: &NewOrder) -> RepoResult<Order> {
        self.ensure_user(order.user_id)?;
        self.orders.update_order(id, order)
    }

    pub fn delete_order(&self, id: OrderId) -> RepoResult<()> {
        self.orders.delete_order(id)?;
        info!("event=order_delete module=service status=ok order_id={id}");
        Ok(())
    }

    /// Orders owned by a user, `NotFound` when the user does not exist.
    pub fn orders_for_user(&self, user_id: UserId) -> RepoResult<Vec<Order>> {
        if self.users.get_user(user_id)?.is_none() {
            return Err(RepoError::NotFound {
                kind: EntityKind::User,
                id: user_id,
            });
        }
        self.orders.list_orders_for_user(user_id)
    }

    /// Products linked to an order, `NotFound` when the order does not exist.
    pub fn products_for_order(&self, order_id: OrderId) -> RepoResult<Vec<Product>> {
        self.get_order(order_id)?;
        self.orders.list_products_for_order(order_id)
    }

    /// Links a product to an order. `LinkExists` when already linked.
    pub fn add_product(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> RepoResult<(Order, Product)> {
        let (order, product) = self.resolve_link(order_id, product_id)?;
        if self.orders.has_product(order_id, product_id)? {
            return Err(RepoError::LinkExists {
                order_id,
                product_id,
            });
        }

        self.orders.add_product(order_id, product_id)?;
        info!(
            "event=order_add_product module=service status=ok order_id={order_id} product_id={product_id}"
        );
        Ok((order, product))
    }

    /// Unlinks a product from an order. `LinkMissing` when not linked.
    pub fn remove_product(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> RepoResult<(Order, Product)> {
        let (order, product) = self.resolve_link(order_id, product_id)?;
        self.orders.remove_product(order_id, product_id)?;
        info!(
            "event=order_remove_product module=service status=ok order_id={order_id} product_id={product_id}"
        );
        Ok((order, product))
    }

    fn resolve_link(
        &self,
        order_id: OrderId,
        product_id: ProductId,
    ) -> RepoResult<(Order, Product)> {
        let order = self.get_order(order_id)?;
        let product = self
            .products
            .get_product(product_id)?
            .ok_or(RepoError::NotFound {
                kind: EntityKind::Product,
                id: product_id,
            })?;
        Ok((order, product))
    }

    fn ensure_user(&self, user_id: UserId) -> RepoResult<()> {
        if self.users.get_user(user_id)?.is_none() {
            return Err(RepoError::Validation(ValidationError::single(
                "user_id",
                format!("User {user_id} does not exist."),
            )));
        }
        Ok(())
    }
}
