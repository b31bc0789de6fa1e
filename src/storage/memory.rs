//! Process-local counter store
//!
//! Keeps the same semantics as the PostgreSQL store behind one mutex. Used by
//! tests and by `serve --memory`. Counts do not survive a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::errors::{StoreError, StoreResult};
use super::{CounterStore, ProjectClick, TabVisit};

#[derive(Debug)]
struct ProjectRow {
    click_count: i32,
    last_clicked_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    portfolio_views: Option<i32>,
    tab_visits: HashMap<String, i32>,
    project_clicks: HashMap<String, ProjectRow>,
    project_click_logs: Vec<(String, DateTime<Utc>)>,
    portfolio_visit_logs: Vec<DateTime<Utc>>,
}

/// In-memory [`CounterStore`].
#[derive(Debug)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle availability. While unavailable every operation fails, which
    /// is how a database outage looks to the routes.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Whether the portfolio view row exists.
    pub fn has_portfolio_views_row(&self) -> bool {
        self.lock()
            .map(|t| t.portfolio_views.is_some())
            .unwrap_or(false)
    }

    /// Click log entries for one project.
    pub fn click_log_count(&self, project_name: &str) -> usize {
        self.lock()
            .map(|t| {
                t.project_click_logs
                    .iter()
                    .filter(|(name, _)| name == project_name)
                    .count()
            })
            .unwrap_or(0)
    }

    pub fn visit_log_count(&self) -> usize {
        self.lock().map(|t| t.portfolio_visit_logs.len()).unwrap_or(0)
    }

    /// When the project was last clicked, if ever.
    pub fn last_clicked_at(&self, project_name: &str) -> Option<DateTime<Utc>> {
        self.lock()
            .ok()?
            .project_clicks
            .get(project_name)
            .map(|row| row.last_clicked_at)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("memory store is offline"));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::unavailable("memory store lock poisoned"))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted_desc<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (i32, &str)) -> Vec<T> {
    rows.sort_by(|a, b| {
        let (count_a, name_a) = key(a);
        let (count_b, name_b) = key(b);
        count_b.cmp(&count_a).then_with(|| name_a.cmp(name_b))
    });
    rows
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn ensure_schema(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn increment_portfolio_views(&self) -> StoreResult<i32> {
        let mut tables = self.lock()?;
        let count = tables.portfolio_views.map_or(1, |c| c + 1);
        tables.portfolio_views = Some(count);
        Ok(count)
    }

    async fn portfolio_views(&self) -> StoreResult<i32> {
        Ok(self.lock()?.portfolio_views.unwrap_or(0))
    }

    async fn log_portfolio_visit(&self) -> StoreResult<()> {
        self.lock()?.portfolio_visit_logs.push(Utc::now());
        Ok(())
    }

    async fn increment_tab_visit(&self, tab_name: &str) -> StoreResult<TabVisit> {
        let mut tables = self.lock()?;
        let visit_count = tables
            .tab_visits
            .entry(tab_name.to_string())
            .and_modify(|c| *c += 1)
            .or_insert(1);

        Ok(TabVisit {
            tab_name: tab_name.to_string(),
            visit_count: *visit_count,
        })
    }

    async fn tab_visits(&self) -> StoreResult<Vec<TabVisit>> {
        let rows: Vec<TabVisit> = self
            .lock()?
            .tab_visits
            .iter()
            .map(|(name, count)| TabVisit {
                tab_name: name.clone(),
                visit_count: *count,
            })
            .collect();

        Ok(sorted_desc(rows, |v| (v.visit_count, v.tab_name.as_str())))
    }

    async fn record_project_click(&self, project_name: &str) -> StoreResult<ProjectClick> {
        let mut tables = self.lock()?;
        let now = Utc::now();

        let row = tables
            .project_clicks
            .entry(project_name.to_string())
            .or_insert(ProjectRow {
                click_count: 0,
                last_clicked_at: now,
            });
        row.click_count += 1;
        row.last_clicked_at = now;
        let click_count = row.click_count;

        tables
            .project_click_logs
            .push((project_name.to_string(), now));

        Ok(ProjectClick {
            project_name: project_name.to_string(),
            click_count,
        })
    }

    async fn project_clicks(&self) -> StoreResult<Vec<ProjectClick>> {
        let rows: Vec<ProjectClick> = self
            .lock()?
            .project_clicks
            .iter()
            .map(|(name, row)| ProjectClick {
                project_name: name.clone(),
                click_count: row.click_count,
            })
            .collect();

        Ok(sorted_desc(rows, |c| (c.click_count, c.project_name.as_str())))
    }

    async fn ping(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn close(&self) {
        self.set_available(false);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_first_increment_creates_row_at_one() {
        let store = MemoryStore::new();
        let visit = store.increment_tab_visit("about").await.unwrap();
        assert_eq!(visit.visit_count, 1);
        assert_eq!(store.increment_portfolio_views().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sequential_increments_count_up() {
        let store = MemoryStore::new();
        for expected in 1..=5 {
            let click = store.record_project_click("demo").await.unwrap();
            assert_eq!(click.click_count, expected);
        }
        assert_eq!(store.click_log_count("demo"), 5);
        assert!(store.last_clicked_at("demo").is_some());
    }

    #[tokio::test]
    async fn test_read_does_not_create_row() {
        let store = MemoryStore::new();
        assert_eq!(store.portfolio_views().await.unwrap(), 0);
        assert!(!store.has_portfolio_views_row());
    }

    #[tokio::test]
    async fn test_listing_order() {
        let store = MemoryStore::new();
        store.increment_tab_visit("b").await.unwrap();
        store.increment_tab_visit("a").await.unwrap();
        for _ in 0..3 {
            store.increment_tab_visit("c").await.unwrap();
        }

        let names: Vec<_> = store
            .tab_visits()
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.tab_name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.increment_portfolio_views().await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.portfolio_views().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert!(store.ping().await.is_err());
        assert!(store.increment_portfolio_views().await.is_err());
        assert!(store.record_project_click("demo").await.is_err());

        store.set_available(true);
        assert!(store.ping().await.is_ok());
        assert_eq!(store.click_log_count("demo"), 0);
    }

    #[tokio::test]
    async fn test_close_makes_store_unavailable() {
        let store = MemoryStore::new();
        store.close().await;
        assert!(store.ping().await.is_err());
    }
}
