//! Core domain logic for the storefront service.
//! This crate is the single source of truth for business invariants:
//! entity shapes, input validation, persistence and cascade policy.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schema;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbLocation, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::{
    EntityKind, NewOrder, NewProduct, NewUser, Order, OrderId, Product, ProductId, User, UserId,
    ValidationError,
};
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::product_repo::{ProductRepository, SqliteProductRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use schema::{OrderSchema, ProductSchema, Schema, UserSchema};
pub use service::order_service::OrderService;
pub use service::product_service::ProductService;
pub use service::user_service::UserService;
pub use service::{SqliteOrderService, Storefront};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
