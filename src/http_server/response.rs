//! # Response Formatting
//!
//! JSON envelopes returned by the counter routes. Envelope keys are
//! camelCase; listed rows keep their column names.

use serde::Serialize;

use crate::storage::{ProjectClick, TabVisit};

/// `{success, count}`
#[derive(Debug, Clone, Serialize)]
pub struct CountResponse {
    pub success: bool,
    pub count: i32,
}

impl CountResponse {
    pub fn new(count: i32) -> Self {
        Self {
            success: true,
            count,
        }
    }
}

/// `{success, message}`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// `{success: false, message}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabVisitResponse {
    pub success: bool,
    pub tab_name: String,
    pub visit_count: i32,
}

impl From<TabVisit> for TabVisitResponse {
    fn from(visit: TabVisit) -> Self {
        Self {
            success: true,
            tab_name: visit.tab_name,
            visit_count: visit.visit_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabVisitsResponse {
    pub success: bool,
    pub tab_visits: Vec<TabVisit>,
}

impl TabVisitsResponse {
    pub fn new(tab_visits: Vec<TabVisit>) -> Self {
        Self {
            success: true,
            tab_visits,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectClickResponse {
    pub success: bool,
    pub project_name: String,
    pub click_count: i32,
}

impl From<ProjectClick> for ProjectClickResponse {
    fn from(click: ProjectClick) -> Self {
        Self {
            success: true,
            project_name: click.project_name,
            click_count: click.click_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectClicksResponse {
    pub success: bool,
    pub project_clicks: Vec<ProjectClick>,
}

impl ProjectClicksResponse {
    pub fn new(project_clicks: Vec<ProjectClick>) -> Self {
        Self {
            success: true,
            project_clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_visit_envelope_is_camel_case() {
        let response = TabVisitResponse::from(TabVisit {
            tab_name: "about".to_string(),
            visit_count: 3,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["tabName"], "about");
        assert_eq!(json["visitCount"], 3);
    }

    #[test]
    fn test_listing_rows_keep_column_names() {
        let response = ProjectClicksResponse::new(vec![ProjectClick {
            project_name: "demo".to_string(),
            click_count: 1,
        }]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["projectClicks"][0]["project_name"], "demo");
        assert_eq!(json["projectClicks"][0]["click_count"], 1);
    }

    #[test]
    fn test_error_envelope() {
        let json = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "boom");
    }
}
