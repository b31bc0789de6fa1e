//! Project Click HTTP Routes
//!
//! A click increments the project's counter and appends a click log row.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use super::errors::{ApiError, ApiResult};
use super::response::{ProjectClickResponse, ProjectClicksResponse};
use super::SharedStore;

/// Project click routes with shared store
pub fn projects_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/projects/click/:projectName", post(record_click_handler))
        .route("/api/projects/clicks", get(list_clicks_handler))
        .with_state(store)
}

async fn record_click_handler(
    State(store): State<SharedStore>,
    Path(project_name): Path<String>,
) -> ApiResult<Json<ProjectClickResponse>> {
    let click = store
        .record_project_click(&project_name)
        .await
        .map_err(|e| {
            ApiError::store(
                format!("Server error incrementing click count for {}.", project_name),
                e,
            )
        })?;

    debug!(project = %click.project_name, clicks = click.click_count, "Project click recorded");
    Ok(Json(ProjectClickResponse::from(click)))
}

async fn list_clicks_handler(
    State(store): State<SharedStore>,
) -> ApiResult<Json<ProjectClicksResponse>> {
    let clicks = store
        .project_clicks()
        .await
        .map_err(|e| ApiError::store("Server error fetching click counts", e))?;

    Ok(Json(ProjectClicksResponse::new(clicks)))
}
