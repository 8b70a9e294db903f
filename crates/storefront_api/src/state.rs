//! Shared application state handed to every handler.
//!
//! # Invariants
//! - The connection is owned here and reached only through `AppState::run`.
//! - One request holds the connection lock for its whole unit of work, which
//!   makes the lock scope the request's database session.

use crate::error::ApiError;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;
use storefront_core::{DbLocation, DbResult, Storefront};

/// Persistence handle injected into handlers through `axum::extract::State`.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps an already-migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Opens and migrates the store at `location`.
    pub fn open(location: &DbLocation) -> DbResult<Self> {
        location.open().map(Self::new)
    }

    /// Runs one request's database work on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Storefront<'_>) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            let store = Storefront::new(&conn);
            op(&store)
        })
        .await?
    }
}
