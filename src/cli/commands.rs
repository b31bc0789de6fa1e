//! CLI command implementations
//!
//! Startup is strict: if the database cannot be reached or a table cannot be
//! created, the command fails before any listener is bound.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::args::{Cli, Command, DatabaseArgs, ServeArgs};
use super::errors::{CliError, CliResult};
use crate::http_server::{HttpServer, SharedStore};
use crate::observability::init_logging;
use crate::storage::{CounterStore, MemoryStore, PgStore};

/// Parse arguments, install logging, run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_logging(cli.log_format);

    info!(
        service = "portfolio-counter",
        version = env!("CARGO_PKG_VERSION"),
        "Starting"
    );

    run_command(cli.into_command()?)
}

/// Run the appropriate command on a fresh tokio runtime
pub fn run_command(cmd: Command) -> CliResult<()> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    match cmd {
        Command::Serve(args) => rt.block_on(serve(args)),
        Command::Bootstrap(args) => rt.block_on(bootstrap(args)),
    }
}

/// Connect to PostgreSQL and ensure every table exists
pub async fn open_store(args: &DatabaseArgs) -> CliResult<PgStore> {
    let config = args.store_config()?;

    let store = PgStore::connect(&config).await.map_err(|e| {
        error!(error = %e, "Database connection failed");
        CliError::boot_failed(format!("Database connection failed: {}", e))
    })?;

    if let Err(e) = store.ensure_schema().await {
        error!(error = %e, "Table creation failed");
        store.close().await;
        return Err(CliError::boot_failed(format!("Table creation failed: {}", e)));
    }

    Ok(store)
}

/// Serve the HTTP API until shutdown
pub async fn serve(args: ServeArgs) -> CliResult<()> {
    let store: SharedStore = if args.memory {
        warn!("Serving from process memory; counts are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(open_store(&args.database).await?)
    };

    let server = HttpServer::with_config(args.http_config(), store);
    info!(address = %server.socket_addr(), "Starting HTTP server");

    server
        .start()
        .await
        .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
}

/// Ensure the schema, then release the pool
pub async fn bootstrap(args: DatabaseArgs) -> CliResult<()> {
    let store = open_store(&args).await?;
    info!("Schema is ready");
    store.close().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliErrorCode;

    fn database_args(url: Option<&str>) -> DatabaseArgs {
        DatabaseArgs {
            database_url: url.map(str::to_string),
            ssl_mode: "disable".to_string(),
            max_connections: 1,
        }
    }

    #[tokio::test]
    async fn test_bootstrap_without_url_fails() {
        let err = bootstrap(database_args(None)).await.unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn test_malformed_url_is_fatal_boot_error() {
        let err = open_store(&database_args(Some("not a connection string")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::BootFailed);
    }

    #[tokio::test]
    async fn test_serve_fails_when_port_taken() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let args = ServeArgs {
            host: "127.0.0.1".to_string(),
            port,
            memory: true,
            database: database_args(None),
        };

        let err = serve(args).await.unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ServeFailed);
    }
}
