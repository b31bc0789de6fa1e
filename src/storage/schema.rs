//! Table definitions applied at bootstrap.
//!
//! Every statement is `CREATE TABLE IF NOT EXISTS`, so applying the list
//! again on an existing database is a no-op.

/// Tables in the order they are ensured.
pub const TABLE_NAMES: [&str; 5] = [
    "portfolio_views",
    "project_clicks",
    "project_click_logs",
    "tab_visits",
    "portfolio_visit_logs",
];

/// One DDL statement per entry of [`TABLE_NAMES`], same order.
pub const SCHEMA_STATEMENTS: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS portfolio_views (
        id SERIAL PRIMARY KEY,
        identifier VARCHAR(255) UNIQUE NOT NULL,
        count INT DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS project_clicks (
        id SERIAL PRIMARY KEY,
        project_name VARCHAR(255) UNIQUE NOT NULL,
        click_count INT DEFAULT 0,
        last_clicked_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS project_click_logs (
        id SERIAL PRIMARY KEY,
        project_name VARCHAR(255) NOT NULL,
        clicked_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )",
    "CREATE TABLE IF NOT EXISTS tab_visits (
        id SERIAL PRIMARY KEY,
        tab_name VARCHAR(255) UNIQUE NOT NULL,
        visit_count INT DEFAULT 0
    )",
    "CREATE TABLE IF NOT EXISTS portfolio_visit_logs (
        id SERIAL PRIMARY KEY,
        visited_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP
    )",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_match_table_names() {
        for (name, statement) in TABLE_NAMES.iter().zip(SCHEMA_STATEMENTS.iter()) {
            let header = format!("CREATE TABLE IF NOT EXISTS {} (", name);
            assert!(statement.starts_with(&header), "{} mismatched", name);
        }
    }

    #[test]
    fn test_counter_keys_are_unique() {
        assert!(SCHEMA_STATEMENTS[0].contains("identifier VARCHAR(255) UNIQUE NOT NULL"));
        assert!(SCHEMA_STATEMENTS[1].contains("project_name VARCHAR(255) UNIQUE NOT NULL"));
        assert!(SCHEMA_STATEMENTS[3].contains("tab_name VARCHAR(255) UNIQUE NOT NULL"));
        // log tables carry no uniqueness
        assert!(!SCHEMA_STATEMENTS[2].contains("UNIQUE"));
        assert!(!SCHEMA_STATEMENTS[4].contains("UNIQUE"));
    }
}
