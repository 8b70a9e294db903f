//! Router assembly and the server run loop.

use crate::config::ServerConfig;
use crate::handlers::{self, orders, products, users};
use crate::request_log::log_requests;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{delete, get};
use axum::Router;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use storefront_core::DbError;

/// Builds the full route table over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/orders/user/:user_id", get(orders::user_orders))
        .route(
            "/orders/:order_id",
            get(orders::get_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/orders/:order_id/products", get(orders::order_products))
        .route(
            "/orders/:order_id/add_product/:product_id",
            get(orders::add_product),
        )
        .route(
            "/orders/:order_id/remove_product/:product_id",
            delete(orders::remove_product),
        )
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

#[derive(Debug)]
pub enum ServeError {
    Db(DbError),
    Io(std::io::Error),
}

impl Display for ServeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "failed to open store: {err}"),
            Self::Io(err) => write!(f, "server i/o failure: {err}"),
        }
    }
}

impl Error for ServeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServeError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<std::io::Error> for ServeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Opens the store, binds, and serves until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), ServeError> {
    let location = config.db_location();
    let state = AppState::open(&location)?;
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=api status=ok bind_addr={} db={location}",
        listener.local_addr()?
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=api status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until killed.
        error!("event=signal_install module=api status=error error={err}");
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_requested module=api status=ok");
}
