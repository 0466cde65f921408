use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Phase status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PhaseTask {
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

/// A named stage of the project timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Phase {
    pub id: i64,
    pub name: String,
    /// Stable key (consultation, design, procurement, installation, ...)
    #[serde(default)]
    pub phase: String,
    pub status: PhaseStatus,
    /// 0-100
    pub progress: i32,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tasks: Vec<PhaseTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Milestone {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub phase: String,
}

/// Project timeline with ordered phases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Timeline {
    pub id: i64,
    pub project_id: Option<i64>,
    /// 0-100
    pub overall_progress: i32,
    pub estimated_completion: DateTime<Utc>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub upcoming_milestones: Vec<Milestone>,
    pub created_at: DateTime<Utc>,
}

impl Timeline {
    pub fn count_phases(&self, status: PhaseStatus) -> usize {
        self.phases.iter().filter(|p| p.status == status).count()
    }
}

/// Request to create a timeline
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateTimelineRequest {
    pub project_id: Option<i64>,
    #[serde(default)]
    pub overall_progress: i32,
    pub estimated_completion: DateTime<Utc>,
    #[serde(default)]
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub upcoming_milestones: Vec<Milestone>,
}

/// Request to update a timeline
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateTimelineRequest {
    pub project_id: Option<i64>,
    pub overall_progress: Option<i32>,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub phases: Option<Vec<Phase>>,
    pub upcoming_milestones: Option<Vec<Milestone>>,
}

/// Response containing a list of timelines
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelinesResponse {
    pub timelines: Vec<Timeline>,
}
