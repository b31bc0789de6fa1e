//! PostgreSQL counter store
//!
//! Each increment is a single `INSERT ... ON CONFLICT ... DO UPDATE ...
//! RETURNING` statement, so concurrent increments of the same key are
//! serialized by PostgreSQL and none are lost.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tracing::{debug, info};

use super::errors::StoreResult;
use super::schema::{SCHEMA_STATEMENTS, TABLE_NAMES};
use super::{CounterStore, ProjectClick, TabVisit, PORTFOLIO_VIEWS_ID};

const INCREMENT_PORTFOLIO_VIEWS: &str = "
    INSERT INTO portfolio_views (identifier, count)
    VALUES ($1, 1)
    ON CONFLICT (identifier) DO UPDATE
    SET count = portfolio_views.count + 1
    RETURNING count";

const SELECT_PORTFOLIO_VIEWS: &str =
    "SELECT COALESCE(count, 0) FROM portfolio_views WHERE identifier = $1";

const INSERT_VISIT_LOG: &str =
    "INSERT INTO portfolio_visit_logs (visited_at) VALUES (CURRENT_TIMESTAMP)";

const INCREMENT_TAB_VISIT: &str = "
    INSERT INTO tab_visits (tab_name, visit_count)
    VALUES ($1, 1)
    ON CONFLICT (tab_name) DO UPDATE
    SET visit_count = tab_visits.visit_count + 1
    RETURNING tab_name, visit_count";

const SELECT_TAB_VISITS: &str = "
    SELECT tab_name, COALESCE(visit_count, 0) AS visit_count
    FROM tab_visits
    ORDER BY visit_count DESC, tab_name ASC";

const INCREMENT_PROJECT_CLICK: &str = "
    INSERT INTO project_clicks (project_name, click_count, last_clicked_at)
    VALUES ($1, 1, CURRENT_TIMESTAMP)
    ON CONFLICT (project_name) DO UPDATE
    SET click_count = project_clicks.click_count + 1,
        last_clicked_at = CURRENT_TIMESTAMP
    RETURNING project_name, click_count";

const INSERT_CLICK_LOG: &str =
    "INSERT INTO project_click_logs (project_name, clicked_at) VALUES ($1, CURRENT_TIMESTAMP)";

const SELECT_PROJECT_CLICKS: &str = "
    SELECT project_name, COALESCE(click_count, 0) AS click_count
    FROM project_clicks
    ORDER BY click_count DESC, project_name ASC";

/// Connection settings for [`PgStore`]
#[derive(Debug, Clone)]
pub struct PgStoreConfig {
    pub database_url: String,
    /// `Require` encrypts the connection without verifying the certificate.
    pub ssl_mode: PgSslMode,
    pub max_connections: u32,
}

impl PgStoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ssl_mode: PgSslMode::Require,
            max_connections: 5,
        }
    }
}

/// Counter store over a shared, bounded `PgPool`.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the pool and verify one connection.
    pub async fn connect(config: &PgStoreConfig) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(&config.database_url)?.ssl_mode(config.ssl_mode);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(
            max_connections = config.max_connections,
            ssl_mode = ?config.ssl_mode,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CounterStore for PgStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        for (table, statement) in TABLE_NAMES.iter().zip(SCHEMA_STATEMENTS.iter()) {
            sqlx::query(statement).execute(&self.pool).await?;
            info!(table = %table, "Table ensured to exist");
        }
        Ok(())
    }

    async fn increment_portfolio_views(&self) -> StoreResult<i32> {
        let count = sqlx::query_scalar::<_, i32>(INCREMENT_PORTFOLIO_VIEWS)
            .bind(PORTFOLIO_VIEWS_ID)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn portfolio_views(&self) -> StoreResult<i32> {
        let count = sqlx::query_scalar::<_, i32>(SELECT_PORTFOLIO_VIEWS)
            .bind(PORTFOLIO_VIEWS_ID)
            .fetch_optional(&self.pool)
            .await?;
        Ok(count.unwrap_or(0))
    }

    async fn log_portfolio_visit(&self) -> StoreResult<()> {
        sqlx::query(INSERT_VISIT_LOG).execute(&self.pool).await?;
        Ok(())
    }

    async fn increment_tab_visit(&self, tab_name: &str) -> StoreResult<TabVisit> {
        let visit = sqlx::query_as::<_, TabVisit>(INCREMENT_TAB_VISIT)
            .bind(tab_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(visit)
    }

    async fn tab_visits(&self) -> StoreResult<Vec<TabVisit>> {
        let visits = sqlx::query_as::<_, TabVisit>(SELECT_TAB_VISITS)
            .fetch_all(&self.pool)
            .await?;
        Ok(visits)
    }

    async fn record_project_click(&self, project_name: &str) -> StoreResult<ProjectClick> {
        // Counter and log commit together; a failed log insert rolls back the increment.
        let mut tx = self.pool.begin().await?;

        let click = sqlx::query_as::<_, ProjectClick>(INCREMENT_PROJECT_CLICK)
            .bind(project_name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(INSERT_CLICK_LOG)
            .bind(project_name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(click)
    }

    async fn project_clicks(&self) -> StoreResult<Vec<ProjectClick>> {
        let clicks = sqlx::query_as::<_, ProjectClick>(SELECT_PROJECT_CLICKS)
            .fetch_all(&self.pool)
            .await?;
        Ok(clicks)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        debug!("Closing PostgreSQL pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PgStoreConfig::new("postgres://localhost/portfolio");
        assert_eq!(config.max_connections, 5);
        assert!(matches!(config.ssl_mode, PgSslMode::Require));
    }

    #[test]
    fn test_increments_use_native_upsert() {
        for statement in [
            INCREMENT_PORTFOLIO_VIEWS,
            INCREMENT_TAB_VISIT,
            INCREMENT_PROJECT_CLICK,
        ] {
            assert!(statement.contains("ON CONFLICT"));
            assert!(statement.contains("RETURNING"));
        }
    }

    #[test]
    fn test_listings_sort_by_count_descending() {
        assert!(SELECT_TAB_VISITS.contains("ORDER BY visit_count DESC"));
        assert!(SELECT_PROJECT_CLICKS.contains("ORDER BY click_count DESC"));
    }
}
