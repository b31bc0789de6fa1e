//! Observability for portfolio-counter
//!
//! Logging goes through `tracing`. The subscriber is installed once at
//! startup by [`init_logging`]; request spans come from
//! `tower_http::trace::TraceLayer` in the HTTP server.

mod logger;

pub use logger::{init_logging, LogFormat, DEFAULT_FILTER};
