//! Embedded schema migrations for the storefront tables.
//!
//! # Invariants
//! - Steps are listed in ascending version order starting at 1.
//! - The schema version lives in `PRAGMA user_version`.
//! - Pending steps apply together in one transaction; a failed step leaves
//!   the file at its previous version.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

/// `(version, sql)` pairs; `0001` creates users/products, `0002` orders and links.
const STEPS: [(u32, &str); 2] = [
    (1, include_str!("0001_users_products.sql")),
    (2, include_str!("0002_orders.sql")),
];

/// Highest schema version this build can create.
pub fn latest_version() -> u32 {
    STEPS.iter().map(|(version, _)| *version).max().unwrap_or(0)
}

/// Brings `conn` up to `latest_version()`.
///
/// A file written by a newer build is refused rather than downgraded.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let latest = latest_version();

    match found.cmp(&latest) {
        std::cmp::Ordering::Greater => Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: latest,
        }),
        std::cmp::Ordering::Equal => Ok(()),
        std::cmp::Ordering::Less => {
            let tx = conn.transaction()?;
            for (version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
                run_step(&tx, *version, sql)?;
            }
            tx.commit()?;
            info!("event=db_migrate module=db status=ok from_version={found} to_version={latest}");
            Ok(())
        }
    }
}

fn run_step(tx: &Transaction<'_>, version: u32, sql: &str) -> DbResult<()> {
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    Ok(())
}
