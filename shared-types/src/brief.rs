use crate::ticket::Photo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Design brief captured by the intake wizard and style quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Brief {
    pub id: i64,
    #[serde(default)]
    pub rooms: Vec<String>,
    /// Question id -> chosen option value
    #[serde(default)]
    pub style_quiz_answers: BTreeMap<String, String>,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    pub created_at: DateTime<Utc>,
}

/// Request to submit a brief
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct CreateBriefRequest {
    pub rooms: Vec<String>,
    pub style_quiz_answers: BTreeMap<String, String>,
    pub requirements: String,
    pub budget: String,
    pub photos: Vec<Photo>,
}

/// Request to update a brief
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateBriefRequest {
    pub rooms: Option<Vec<String>>,
    pub style_quiz_answers: Option<BTreeMap<String, String>>,
    pub requirements: Option<String>,
    pub budget: Option<String>,
    pub photos: Option<Vec<Photo>>,
}

/// Response containing a list of briefs
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BriefsResponse {
    pub briefs: Vec<Brief>,
}
