use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Proposal review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Pending => "pending",
            ProposalStatus::Approved => "approved",
            ProposalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FurnitureItem {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

/// Comment left on a proposal by the client or designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProposalComment {
    pub id: i64,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Room design proposal submitted for client review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Proposal {
    pub id: i64,
    pub room_name: String,
    pub preview_image: String,
    #[serde(default)]
    pub color_palette: Vec<String>,
    pub total_cost: f64,
    pub status: ProposalStatus,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default)]
    pub comments: Vec<ProposalComment>,
    pub room_id: Option<i64>,
    pub client_feedback: Option<String>,
    pub designer_notes: Option<String>,
    pub approval_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revision_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Request to create a new proposal
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateProposalRequest {
    pub room_name: String,
    #[serde(default)]
    pub preview_image: String,
    #[serde(default)]
    pub color_palette: Vec<String>,
    pub total_cost: f64,
    pub status: Option<ProposalStatus>,
    #[serde(default)]
    pub furniture: Vec<FurnitureItem>,
    #[serde(default)]
    pub comments: Vec<ProposalComment>,
    pub room_id: Option<i64>,
    pub client_feedback: Option<String>,
    pub designer_notes: Option<String>,
}

/// Request to update a proposal
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateProposalRequest {
    pub room_name: Option<String>,
    pub preview_image: Option<String>,
    pub color_palette: Option<Vec<String>>,
    pub total_cost: Option<f64>,
    pub status: Option<ProposalStatus>,
    pub furniture: Option<Vec<FurnitureItem>>,
    pub comments: Option<Vec<ProposalComment>>,
    pub room_id: Option<i64>,
    pub client_feedback: Option<String>,
    pub designer_notes: Option<String>,
    pub approval_date: Option<DateTime<Utc>>,
    pub revision_count: Option<i32>,
}

/// Response containing a list of proposals
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProposalsResponse {
    pub proposals: Vec<Proposal>,
}
