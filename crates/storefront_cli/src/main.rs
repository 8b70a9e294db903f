//! Storefront server entry point.
//!
//! # Responsibility
//! - Resolve flags and `STOREFRONT_*` environment variables into `ServerConfig`.
//! - Initialize logging before anything else runs, then serve until Ctrl-C.

use clap::Parser;
use log::error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use storefront_api::{serve, ServerConfig, DEFAULT_BIND_ADDR, DEFAULT_DB_FILE_NAME};
use storefront_core::{default_log_level, init_logging};

/// Users, products and orders over HTTP/JSON.
#[derive(Debug, Parser)]
#[command(name = "storefront", version)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "STOREFRONT_BIND", default_value = DEFAULT_BIND_ADDR)]
    bind: SocketAddr,

    /// SQLite database file, or `:memory:`.
    #[arg(long, env = "STOREFRONT_DB_PATH", default_value = DEFAULT_DB_FILE_NAME)]
    db_path: PathBuf,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long, env = "STOREFRONT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when unset.
    #[arg(long, env = "STOREFRONT_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            db_path: self.db_path,
            log_level: self
                .log_level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: self.log_dir,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Cli::parse().into_config();

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("storefront: {err}");
        return ExitCode::FAILURE;
    }

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            eprintln!("storefront: {err}");
            ExitCode::FAILURE
        }
    }
}
