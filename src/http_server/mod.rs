//! # Portfolio Counter HTTP Server Module
//!
//! Axum server exposing the counter routes over one shared [`CounterStore`].
//!
//! # Endpoints
//!
//! - `/`, `/health` - Liveness text and store readiness
//! - `/api/views/*` - Portfolio view counter and visit log
//! - `/api/tabs/*` - Tab visit counters
//! - `/api/projects/*` - Project click counters and click log

use std::sync::Arc;

use crate::storage::CounterStore;

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod projects_routes;
pub mod response;
pub mod server;
pub mod tabs_routes;
pub mod views_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{shutdown_signal, HttpServer};

/// Store handle shared by every route
pub type SharedStore = Arc<dyn CounterStore>;
