//! Observability HTTP Routes
//!
//! Liveness text at `/` and a readiness check at `/health` that pings the
//! counter store.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use super::SharedStore;

/// Text served at `/`
pub const ROOT_MESSAGE: &str = "Hello from the Portfolio Backend (PostgreSQL)!";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Root liveness and health routes
pub fn health_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .with_state(store)
}

async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// 200 when the store answers, 503 otherwise
async fn health_handler(State(store): State<SharedStore>) -> impl IntoResponse {
    let (status, label) = match store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ok"));
    }
}
