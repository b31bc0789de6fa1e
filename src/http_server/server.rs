//! # HTTP Server
//!
//! Combines the route groups, applies CORS and request tracing, and runs the
//! listener until a shutdown signal arrives. The store is closed once the
//! last in-flight request has finished.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::projects_routes::projects_routes;
use super::tabs_routes::tabs_routes;
use super::views_routes::views_routes;
use super::SharedStore;

/// HTTP Server for the portfolio counters
pub struct HttpServer {
    config: HttpServerConfig,
    store: SharedStore,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(store: SharedStore) -> Self {
        Self::with_config(HttpServerConfig::default(), store)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, store: SharedStore) -> Self {
        let router = Self::build_router(store.clone());
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(store: SharedStore) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(store.clone()))
            .merge(views_routes(store.clone()))
            .merge(tabs_routes(store.clone()))
            .merge(projects_routes(store))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<(), std::io::Error> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then close the store
    pub async fn start_with_shutdown<F>(self, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!(address = %listener.local_addr()?, "Backend server listening");

        let served = axum::serve(listener, self.router)
            .with_graceful_shutdown(signal)
            .await;

        info!("Server shutting down, closing store");
        self.store.close().await;

        served
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::SignalKind;

        match signal::unix::signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
