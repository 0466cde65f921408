use super::{Notice, PageState};
use crate::components::SelectedFile;
use crate::error::ServiceResult;
use crate::store::Services;
use crate::validation;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use shared_types::{CreateMessageRequest, Message, MessageAttachment};
use uuid::Uuid;

const CLIENT_SENDER_ID: &str = "client";
const CLIENT_SENDER_NAME: &str = "You";

/// Messages sent on one calendar day, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageGroup {
    pub date: NaiveDate,
    pub messages: Vec<Message>,
}

impl MessageGroup {
    /// e.g. "Tuesday, March 12, 2024"
    pub fn heading(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }
}

pub fn group_by_day(messages: &[Message]) -> Vec<MessageGroup> {
    let mut sorted = messages.to_vec();
    sorted.sort_by_key(|m| m.timestamp);

    let mut groups: Vec<MessageGroup> = Vec::new();
    for message in sorted {
        let date = message.timestamp.date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.messages.push(message),
            _ => groups.push(MessageGroup {
                date,
                messages: vec![message],
            }),
        }
    }
    groups
}

pub struct MessagesPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub messages: Vec<Message>,
}

impl MessagesPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            messages: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = self.services.messages.get_all().await;
        self.state = PageState::settle(&result, "Failed to load messages");
        if let Ok(messages) = result {
            self.messages = messages;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn grouped(&self) -> Vec<MessageGroup> {
        group_by_day(&self.messages)
    }

    pub fn is_own(message: &Message) -> bool {
        message.sender_id == CLIENT_SENDER_ID
    }

    /// Sends as the client. Blank text with no files is rejected before
    /// anything reaches the store.
    pub async fn send(&mut self, content: &str, files: Vec<SelectedFile>) -> ServiceResult<Message> {
        let attachments: Vec<MessageAttachment> = files
            .into_iter()
            .map(|file| MessageAttachment {
                name: file.name,
                mime_type: file.mime_type,
                url: format!("blob:{}", Uuid::new_v4()),
            })
            .collect();
        let result = match validation::validate_message(content, &attachments) {
            Ok(()) => {
                let request = CreateMessageRequest {
                    content: content.trim().to_string(),
                    sender_id: CLIENT_SENDER_ID.to_string(),
                    sender_name: CLIENT_SENDER_NAME.to_string(),
                    timestamp: Some(Utc::now()),
                    attachments,
                };
                self.services.messages.create(request).await
            }
            Err(err) => Err(err),
        };
        self.notice = Some(Notice::outcome(
            &result,
            "Message sent successfully",
            "Failed to send message",
        ));
        if result.is_ok() {
            self.load().await;
        }
        result
    }
}
