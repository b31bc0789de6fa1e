//! Portfolio View HTTP Routes
//!
//! - `POST /api/views/increment`: count one page view
//! - `GET /api/views`: current view count, 0 before the first view
//! - `POST /api/views/logs`: append one visit log row

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use super::errors::{ApiError, ApiResult};
use super::response::{CountResponse, MessageResponse};
use super::SharedStore;

/// Portfolio view routes with shared store
pub fn views_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/views", get(get_views_handler))
        .route("/api/views/increment", post(increment_views_handler))
        .route("/api/views/logs", post(log_visit_handler))
        .with_state(store)
}

async fn increment_views_handler(
    State(store): State<SharedStore>,
) -> ApiResult<Json<CountResponse>> {
    let count = store
        .increment_portfolio_views()
        .await
        .map_err(|e| ApiError::store("Server error incrementing view count", e))?;

    Ok(Json(CountResponse::new(count)))
}

async fn get_views_handler(State(store): State<SharedStore>) -> ApiResult<Json<CountResponse>> {
    let count = store
        .portfolio_views()
        .await
        .map_err(|e| ApiError::store("Server error fetching view count", e))?;

    Ok(Json(CountResponse::new(count)))
}

async fn log_visit_handler(State(store): State<SharedStore>) -> ApiResult<Json<MessageResponse>> {
    store
        .log_portfolio_visit()
        .await
        .map_err(|e| ApiError::store("Server error logging portfolio visit", e))?;

    Ok(Json(MessageResponse::new("Portfolio visit logged")))
}
