use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Site visit status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SiteVisitStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl SiteVisitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteVisitStatus::Scheduled => "scheduled",
            SiteVisitStatus::Confirmed => "confirmed",
            SiteVisitStatus::Completed => "completed",
            SiteVisitStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SiteVisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled visit to the project site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SiteVisit {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SiteVisitStatus,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub timeline_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Request to schedule a site visit
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateSiteVisitRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: Option<SiteVisitStatus>,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub timeline_id: Option<i64>,
}

/// Request to update a site visit
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateSiteVisitRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<SiteVisitStatus>,
    pub phase: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub timeline_id: Option<i64>,
}

/// Response containing a list of site visits
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SiteVisitsResponse {
    pub site_visits: Vec<SiteVisit>,
}
