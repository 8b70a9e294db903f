//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `email` uniqueness is enforced by the store and reported as `Duplicate`.
//! - Deleting a user that still owns orders fails with `InUse`.

use crate::model::{EntityKind, NewUser, User, UserId};
use crate::repo::{constraint_violation, Constraint, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT id, name, address, email FROM users";

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn create_user(&self, user: &NewUser) -> RepoResult<User>;
    /// Replaces every mutable field of an existing user.
    fn update_user(&self, id: UserId, user: &NewUser) -> RepoResult<User>;
    fn delete_user(&self, id: UserId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn create_user(&self, user: &NewUser) -> RepoResult<User> {
        user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (name, address, email) VALUES (?1, ?2, ?3);",
                params![user.name, user.address, user.email],
            )
            .map_err(map_user_write_error)?;

        Ok(user.clone().into_user(self.conn.last_insert_rowid()))
    }

    fn update_user(&self, id: UserId, user: &NewUser) -> RepoResult<User> {
        user.validate()?;

        let changed = self
            .conn
            .execute(
                "UPDATE users
                 SET
                    name = ?1,
                    address = ?2,
                    email = ?3
                 WHERE id = ?4;",
                params![user.name, user.address, user.email, id],
            )
            .map_err(map_user_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::User,
                id,
            });
        }

        Ok(user.clone().into_user(id))
    }

    fn delete_user(&self, id: UserId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id])
            .map_err(|err| match constraint_violation(&err) {
                Some(Constraint::ForeignKey) => RepoError::InUse {
                    kind: EntityKind::User,
                    id,
                },
                _ => err.into(),
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: EntityKind::User,
                id,
            });
        }

        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        email: row.get("email")?,
    })
}

fn map_user_write_error(err: rusqlite::Error) -> RepoError {
    match constraint_violation(&err) {
        Some(Constraint::Unique) => RepoError::Duplicate { field: "email" },
        _ => err.into(),
    }
}
