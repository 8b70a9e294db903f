//! Use-case services over the entity repositories.
//!
//! # Responsibility
//! - Orchestrate repository calls into the operations handlers expose.
//! - Turn "no such row" into `RepoError::NotFound` so callers map it uniformly.
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - Services stay storage-agnostic; `Storefront` is the only SQLite-aware wiring.

pub mod order_service;
pub mod product_service;
pub mod user_service;

use crate::repo::order_repo::SqliteOrderRepository;
use crate::repo::product_repo::SqliteProductRepository;
use crate::repo::user_repo::SqliteUserRepository;
use order_service::OrderService;
use product_service::ProductService;
use rusqlite::Connection;
use user_service::UserService;

/// SQLite-backed order service with its user/product lookups.
pub type SqliteOrderService<'conn> = OrderService<
    SqliteOrderRepository<'conn>,
    SqliteUserRepository<'conn>,
    SqliteProductRepository<'conn>,
>;

/// All storefront services bound to one request-scoped connection.
pub struct Storefront<'conn> {
    pub users: UserService<SqliteUserRepository<'conn>>,
    pub products: ProductService<SqliteProductRepository<'conn>>,
    pub orders: SqliteOrderService<'conn>,
}

impl<'conn> Storefront<'conn> {
    /// Wires every service onto `conn`, which must already be migrated.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            users: UserService::new(SqliteUserRepository::new(conn)),
            products: ProductService::new(SqliteProductRepository::new(conn)),
            orders: OrderService::new(
                SqliteOrderRepository::new(conn),
                SqliteUserRepository::new(conn),
                SqliteProductRepository::new(conn),
            ),
        }
    }
}
