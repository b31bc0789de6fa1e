//! Tab Visit HTTP Routes

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::debug;

use super::errors::{ApiError, ApiResult};
use super::response::{TabVisitResponse, TabVisitsResponse};
use super::SharedStore;

/// Tab visit routes with shared store
pub fn tabs_routes(store: SharedStore) -> Router {
    Router::new()
        .route("/api/tabs/increment/:tabName", post(increment_tab_handler))
        .route("/api/tabs/visits", get(list_tabs_handler))
        .with_state(store)
}

async fn increment_tab_handler(
    State(store): State<SharedStore>,
    Path(tab_name): Path<String>,
) -> ApiResult<Json<TabVisitResponse>> {
    let visit = store.increment_tab_visit(&tab_name).await.map_err(|e| {
        ApiError::store(
            format!("Server error incrementing visit count for {}.", tab_name),
            e,
        )
    })?;

    debug!(tab = %visit.tab_name, visits = visit.visit_count, "Tab visit counted");
    Ok(Json(TabVisitResponse::from(visit)))
}

async fn list_tabs_handler(
    State(store): State<SharedStore>,
) -> ApiResult<Json<TabVisitsResponse>> {
    let visits = store
        .tab_visits()
        .await
        .map_err(|e| ApiError::store("Server error fetching tab visit counts", e))?;

    Ok(Json(TabVisitsResponse::new(visits)))
}
