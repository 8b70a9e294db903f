//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use storefront_core::{default_log_level, DbLocation};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DB_FILE_NAME: &str = "storefront.sqlite3";
const DEFAULT_PORT: u16 = 5000;

/// Everything the server needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// SQLite file path; `:memory:` selects a private in-memory store.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rotating log files; `None` logs to stderr.
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn db_location(&self) -> DbLocation {
        DbLocation::from_path(&self.db_path)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServerConfig, DEFAULT_BIND_ADDR};
    use std::net::SocketAddr;
    use storefront_core::DbLocation;

    #[test]
    fn default_bind_addr_matches_published_constant() {
        let expected: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(ServerConfig::default().bind_addr, expected);
    }

    #[test]
    fn memory_sentinel_selects_in_memory_store() {
        let config = ServerConfig {
            db_path: ":memory:".into(),
            ..ServerConfig::default()
        };
        assert_eq!(config.db_location(), DbLocation::Memory);
        assert!(matches!(
            ServerConfig::default().db_location(),
            DbLocation::File(_)
        ));
    }
}
