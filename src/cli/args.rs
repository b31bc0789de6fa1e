//! CLI argument definitions using clap
//!
//! Commands:
//! - portfolio-counter serve [--memory]
//! - portfolio-counter bootstrap
//!
//! Every option can also come from the environment variable named next to
//! it; a flag on the command line wins.

use std::ffi::OsString;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use sqlx::postgres::PgSslMode;

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogFormat;
use crate::storage::PgStoreConfig;

/// Portfolio counter backend
#[derive(Parser, Debug)]
#[command(name = "portfolio-counter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ensure the schema and serve the HTTP API (default)
    Serve(ServeArgs),

    /// Ensure the schema and exit
    Bootstrap(DatabaseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Keep counters in process memory instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// disable | allow | prefer | require | verify-ca | verify-full
    #[arg(long, env = "DATABASE_SSL_MODE", default_value = "require")]
    pub ssl_mode: String,

    /// Upper bound on pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Validate into a store configuration
    pub fn store_config(&self) -> CliResult<PgStoreConfig> {
        let database_url = self
            .database_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CliError::config_error("DATABASE_URL is not set"))?;

        let ssl_mode = PgSslMode::from_str(&self.ssl_mode).map_err(|e| {
            CliError::config_error(format!("Invalid DATABASE_SSL_MODE '{}': {}", self.ssl_mode, e))
        })?;

        if self.max_connections == 0 {
            return Err(CliError::config_error(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }

        Ok(PgStoreConfig {
            database_url,
            ssl_mode,
            max_connections: self.max_connections,
        })
    }
}

impl Cli {
    /// Parse command line arguments. A bare invocation runs `serve`.
    pub fn parse_args() -> Self {
        Self::parse_with_default(std::env::args_os())
    }

    fn parse_with_default<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().collect();
        let cli = Cli::parse_from(args.clone());
        if cli.command.is_some() {
            return cli;
        }

        let at = args.len().min(1);
        args.insert(at, OsString::from("serve"));
        Cli::parse_from(args)
    }

    /// The selected command
    pub fn into_command(self) -> CliResult<Command> {
        self.command
            .ok_or_else(|| CliError::config_error("No command given"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn database_args(url: Option<&str>, ssl_mode: &str) -> DatabaseArgs {
        DatabaseArgs {
            database_url: url.map(str::to_string),
            ssl_mode: ssl_mode.to_string(),
            max_connections: 5,
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::parse_with_default(args(&[
            "portfolio-counter",
            "serve",
            "--port",
            "8080",
            "--memory",
        ]));

        match cli.into_command().unwrap() {
            Command::Serve(serve) => {
                assert_eq!(serve.port, 8080);
                assert!(serve.memory);
                assert_eq!(serve.http_config().socket_addr(), format!("{}:8080", serve.host));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bare_invocation_serves() {
        let cli = Cli::parse_with_default(args(&["portfolio-counter"]));
        assert!(matches!(cli.into_command().unwrap(), Command::Serve(_)));
    }

    #[test]
    fn test_bootstrap_flags() {
        let cli = Cli::parse_with_default(args(&[
            "portfolio-counter",
            "bootstrap",
            "--database-url",
            "postgres://localhost/portfolio",
            "--ssl-mode",
            "disable",
        ]));

        match cli.into_command().unwrap() {
            Command::Bootstrap(db) => {
                let config = db.store_config().unwrap();
                assert_eq!(config.database_url, "postgres://localhost/portfolio");
                assert!(matches!(config.ssl_mode, PgSslMode::Disable));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_database_url_is_config_error() {
        let err = database_args(None, "require").store_config().unwrap_err();
        assert_eq!(err.code_str(), "PORTFOLIO_CLI_CONFIG_ERROR");

        let err = database_args(Some("  "), "require").store_config().unwrap_err();
        assert_eq!(err.code_str(), "PORTFOLIO_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_invalid_ssl_mode_is_config_error() {
        let err = database_args(Some("postgres://localhost/db"), "sometimes")
            .store_config()
            .unwrap_err();
        assert!(err.message().contains("DATABASE_SSL_MODE"));
    }

    #[test]
    fn test_default_ssl_mode_requires_tls() {
        let config = database_args(Some("postgres://localhost/db"), "require")
            .store_config()
            .unwrap();
        assert!(matches!(config.ssl_mode, PgSslMode::Require));
    }
}
