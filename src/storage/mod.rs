//! Counter storage for portfolio-counter
//!
//! Every route goes through one data-access capability, [`CounterStore`].
//! Each backend must provide an atomic insert-or-increment for a keyed
//! counter; the application never locks around it.
//!
//! # Tables
//!
//! - `portfolio_views`: single row keyed by [`PORTFOLIO_VIEWS_ID`]
//! - `project_clicks` + `project_click_logs`
//! - `tab_visits`
//! - `portfolio_visit_logs`
//!
//! Counter rows are created lazily on first increment and never deleted.
//! Log tables are append-only.

mod errors;
mod memory;
mod postgres;
mod schema;

use async_trait::async_trait;
use serde::Serialize;

pub use errors::{StoreError, StoreErrorCode, StoreResult};
pub use memory::MemoryStore;
pub use postgres::{PgStore, PgStoreConfig};
pub use schema::{SCHEMA_STATEMENTS, TABLE_NAMES};

/// Fixed key of the single portfolio view counter row.
pub const PORTFOLIO_VIEWS_ID: &str = "portfolio-views";

/// Visit count for one named tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TabVisit {
    pub tab_name: String,
    pub visit_count: i32,
}

/// Click count for one named project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ProjectClick {
    pub project_name: String,
    pub click_count: i32,
}

/// Storage contract shared by every counter route.
///
/// Increments return the post-increment value. Listings are ordered by
/// count descending, ties by name ascending.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Create every table if it does not already exist.
    async fn ensure_schema(&self) -> StoreResult<()>;

    /// Increment the portfolio view counter, creating it at 1.
    async fn increment_portfolio_views(&self) -> StoreResult<i32>;

    /// Current portfolio view count, 0 when never incremented.
    ///
    /// Never creates the row.
    async fn portfolio_views(&self) -> StoreResult<i32>;

    /// Append one row to the portfolio visit log.
    async fn log_portfolio_visit(&self) -> StoreResult<()>;

    async fn increment_tab_visit(&self, tab_name: &str) -> StoreResult<TabVisit>;

    async fn tab_visits(&self) -> StoreResult<Vec<TabVisit>>;

    /// Increment a project's click counter and append a click log row.
    async fn record_project_click(&self, project_name: &str) -> StoreResult<ProjectClick>;

    async fn project_clicks(&self) -> StoreResult<Vec<ProjectClick>>;

    /// Round trip to the backend without touching any table.
    async fn ping(&self) -> StoreResult<()>;

    /// Release backend resources. Later calls fail.
    async fn close(&self);
}
