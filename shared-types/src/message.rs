use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessageAttachment {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
}

/// Message exchanged between the client and the design team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    pub sender_id: String,
    pub sender_name: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub content: String,
    pub sender_id: String,
    pub sender_name: String,
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attachments: Vec<MessageAttachment>,
}

/// Request to edit a message
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdateMessageRequest {
    pub content: Option<String>,
    pub attachments: Option<Vec<MessageAttachment>>,
}

/// Response containing a list of messages
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}
