//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts.
//! - Isolate SQL and SQLite constraint codes from services and handlers.
//!
//! # Invariants
//! - User and product writes call the payload's `validate()` before SQL mutations.
//! - Every write is one statement committed on its own.
//! - Constraint violations surface as semantic errors (`Duplicate`,
//!   `InUse`, `LinkExists`), never as raw database errors.

use crate::db::DbError;
use crate::model::{EntityKind, OrderId, ProductId, ValidationError};
use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    /// Write payload failed field validation.
    Validation(ValidationError),
    /// Transport or unexpected database failure.
    Db(DbError),
    /// No row with this id.
    NotFound { kind: EntityKind, id: i64 },
    /// A unique column already holds this value.
    Duplicate { field: &'static str },
    /// Row is still referenced and cannot be deleted.
    InUse { kind: EntityKind, id: i64 },
    /// The product is already linked to the order.
    LinkExists {
        order_id: OrderId,
        product_id: ProductId,
    },
    /// The product is not linked to the order.
    LinkMissing {
        order_id: OrderId,
        product_id: ProductId,
    },
    /// Persisted row cannot be mapped back into the model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Duplicate { field } => write!(f, "duplicate value for unique field `{field}`"),
            Self::InUse { kind, id } => write!(f, "{kind} {id} is still referenced"),
            Self::LinkExists {
                order_id,
                product_id,
            } => write!(f, "product {product_id} already in order {order_id}"),
            Self::LinkMissing {
                order_id,
                product_id,
            } => write!(f, "product {product_id} not in order {order_id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// SQLite constraint families the repositories translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    PrimaryKey,
    ForeignKey,
    Other,
}

/// Classifies a constraint violation, `None` for any other error.
pub(crate) fn constraint_violation(err: &rusqlite::Error) -> Option<Constraint> {
    let rusqlite::Error::SqliteFailure(inner, _) = err else {
        return None;
    };
    if inner.code != ErrorCode::ConstraintViolation {
        return None;
    }

    let constraint = match inner.extended_code {
        rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => Constraint::Unique,
        rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => Constraint::PrimaryKey,
        rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Constraint::ForeignKey,
        _ => Constraint::Other,
    };
    Some(constraint)
}
