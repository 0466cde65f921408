use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Project status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Design,
    InProgress,
    OnHold,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Design => "design",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interior design project the portal is scoped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client_id: Option<i64>,
    pub designer_id: Option<i64>,
    pub status: ProjectStatus,
    pub budget: f64,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub actual_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rooms: Vec<String>,
    /// 0-100
    #[serde(default)]
    pub progress_percentage: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new project
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProjectRequest {
    pub name: String,
    pub client_id: Option<i64>,
    pub designer_id: Option<i64>,
    #[serde(default)]
    pub status: ProjectStatus,
    pub budget: f64,
    pub estimated_completion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub rooms: Vec<String>,
    #[serde(default)]
    pub progress_percentage: i32,
    pub start_date: Option<DateTime<Utc>>,
}

/// Request to update a project
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub client_id: Option<i64>,
    pub designer_id: Option<i64>,
    pub status: Option<ProjectStatus>,
    pub budget: Option<f64>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub actual_completion: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub rooms: Option<Vec<String>>,
    pub progress_percentage: Option<i32>,
    pub start_date: Option<DateTime<Utc>>,
}

/// Response containing a list of projects
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}
