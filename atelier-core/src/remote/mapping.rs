//! Two-way mapping between domain records and the record store's flat
//! `*_c` field naming. Nested structures travel as JSON-encoded strings.

use super::{RecordFields, RecordQuery};
use crate::error::{EntityKind, ServiceError, ServiceResult};
use crate::store::Entity;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared_types::*;

const ID: &str = "Id";
const CREATED: &str = "CreatedDate";
const MODIFIED: &str = "LastModifiedDate";

pub trait RemoteRecord: Entity {
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];

    fn create_fields(request: &Self::Create) -> ServiceResult<RecordFields>;
    fn update_fields(update: &Self::Update) -> ServiceResult<RecordFields>;
    fn from_fields(fields: &RecordFields) -> ServiceResult<Self>;

    fn query() -> RecordQuery {
        RecordQuery::with_fields(Self::FIELDS)
    }
}

struct FieldWriter {
    kind: EntityKind,
    fields: RecordFields,
}

impl FieldWriter {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            fields: RecordFields::new(),
        }
    }

    fn put<T: Serialize>(&mut self, name: &str, value: &T) -> ServiceResult<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| ServiceError::decode(self.kind, format!("{}: {}", name, e)))?;
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    fn put_json<T: Serialize>(&mut self, name: &str, value: &T) -> ServiceResult<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| ServiceError::decode(self.kind, format!("{}: {}", name, e)))?;
        self.fields.insert(name.to_string(), Value::String(encoded));
        Ok(())
    }

    fn maybe<T: Serialize>(&mut self, name: &str, value: &Option<T>) -> ServiceResult<()> {
        match value {
            Some(value) => self.put(name, value),
            None => Ok(()),
        }
    }

    fn maybe_json<T: Serialize>(&mut self, name: &str, value: &Option<T>) -> ServiceResult<()> {
        match value {
            Some(value) => self.put_json(name, value),
            None => Ok(()),
        }
    }

    fn finish(self) -> RecordFields {
        self.fields
    }
}

struct FieldReader<'a> {
    kind: EntityKind,
    fields: &'a RecordFields,
}

impl<'a> FieldReader<'a> {
    fn new(kind: EntityKind, fields: &'a RecordFields) -> Self {
        Self { kind, fields }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        match self.fields.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(value) => Some(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, name: &str, value: &Value) -> ServiceResult<T> {
        serde_json::from_value(value.clone())
            .map_err(|e| ServiceError::decode(self.kind, format!("{}: {}", name, e)))
    }

    fn id(&self) -> ServiceResult<i64> {
        match self.present(ID) {
            Some(Value::Number(n)) => n
                .as_i64()
                .ok_or_else(|| ServiceError::decode(self.kind, "Id is not an integer")),
            Some(Value::String(s)) => s
                .parse()
                .map_err(|_| ServiceError::decode(self.kind, format!("Id {:?} is not an integer", s))),
            _ => Err(ServiceError::decode(self.kind, "record has no Id")),
        }
    }

    fn get<T: DeserializeOwned>(&self, name: &str) -> ServiceResult<T> {
        match self.present(name) {
            Some(value) => self.decode(name, value),
            None => Err(ServiceError::decode(self.kind, format!("missing field {}", name))),
        }
    }

    fn opt<T: DeserializeOwned>(&self, name: &str) -> ServiceResult<Option<T>> {
        self.present(name).map(|value| self.decode(name, value)).transpose()
    }

    fn or_default<T: DeserializeOwned + Default>(&self, name: &str) -> ServiceResult<T> {
        Ok(self.opt(name)?.unwrap_or_default())
    }

    fn text(&self, name: &str) -> String {
        match self.present(name) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Accepts either a JSON-encoded string or an already-structured value
    fn json<T: DeserializeOwned + Default>(&self, name: &str) -> ServiceResult<T> {
        match self.present(name) {
            Some(Value::String(s)) => serde_json::from_str(s)
                .map_err(|e| ServiceError::decode(self.kind, format!("{}: {}", name, e))),
            Some(value) => self.decode(name, value),
            None => Ok(T::default()),
        }
    }

    fn created(&self) -> ServiceResult<DateTime<Utc>> {
        self.get(CREATED)
    }

    fn modified(&self) -> ServiceResult<DateTime<Utc>> {
        match self.opt(MODIFIED)? {
            Some(date) => Ok(date),
            None => self.created(),
        }
    }
}

impl RemoteRecord for Ticket {
    const TABLE: &'static str = "ticket_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "title_c",
        "description_c",
        "priority_c",
        "status_c",
        "category_c",
        "photos_c",
        "assigned_to_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateTicketRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("title_c", &request.title)?;
        w.put("description_c", &request.description)?;
        w.put("priority_c", &request.priority)?;
        w.put("status_c", &request.status.unwrap_or_default())?;
        w.put("category_c", &request.category)?;
        w.put_json("photos_c", &request.photos)?;
        w.maybe("assigned_to_c", &request.assigned_to)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateTicketRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("title_c", &update.title)?;
        w.maybe("description_c", &update.description)?;
        w.maybe("priority_c", &update.priority)?;
        w.maybe("status_c", &update.status)?;
        w.maybe("category_c", &update.category)?;
        w.maybe_json("photos_c", &update.photos)?;
        w.maybe("assigned_to_c", &update.assigned_to)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Ticket {
            id: r.id()?,
            title: r.text("title_c"),
            description: r.text("description_c"),
            priority: r.or_default("priority_c")?,
            status: r.or_default("status_c")?,
            category: r.text("category_c"),
            photos: r.json("photos_c")?,
            assigned_to: r.opt("assigned_to_c")?,
            created_at: r.created()?,
            updated_at: r.modified()?,
        })
    }
}

impl RemoteRecord for Proposal {
    const TABLE: &'static str = "proposal_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "room_name_c",
        "preview_image_c",
        "color_palette_c",
        "total_cost_c",
        "status_c",
        "furniture_items_c",
        "comments_c",
        "room_id_c",
        "client_feedback_c",
        "designer_notes_c",
        "approval_date_c",
        "revision_count_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateProposalRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("room_name_c", &request.room_name)?;
        w.put("preview_image_c", &request.preview_image)?;
        w.put_json("color_palette_c", &request.color_palette)?;
        w.put("total_cost_c", &request.total_cost)?;
        w.put("status_c", &request.status.unwrap_or_default())?;
        w.put_json("furniture_items_c", &request.furniture)?;
        w.put_json("comments_c", &request.comments)?;
        w.maybe("room_id_c", &request.room_id)?;
        w.maybe("client_feedback_c", &request.client_feedback)?;
        w.maybe("designer_notes_c", &request.designer_notes)?;
        w.put("revision_count_c", &0)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateProposalRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("room_name_c", &update.room_name)?;
        w.maybe("preview_image_c", &update.preview_image)?;
        w.maybe_json("color_palette_c", &update.color_palette)?;
        w.maybe("total_cost_c", &update.total_cost)?;
        w.maybe("status_c", &update.status)?;
        w.maybe_json("furniture_items_c", &update.furniture)?;
        w.maybe_json("comments_c", &update.comments)?;
        w.maybe("room_id_c", &update.room_id)?;
        w.maybe("client_feedback_c", &update.client_feedback)?;
        w.maybe("designer_notes_c", &update.designer_notes)?;
        w.maybe("approval_date_c", &update.approval_date)?;
        w.maybe("revision_count_c", &update.revision_count)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Proposal {
            id: r.id()?,
            room_name: r.text("room_name_c"),
            preview_image: r.text("preview_image_c"),
            color_palette: r.json("color_palette_c")?,
            total_cost: r.or_default("total_cost_c")?,
            status: r.or_default("status_c")?,
            furniture: r.json("furniture_items_c")?,
            comments: r.json("comments_c")?,
            room_id: r.opt("room_id_c")?,
            client_feedback: r.opt("client_feedback_c")?,
            designer_notes: r.opt("designer_notes_c")?,
            approval_date: r.opt("approval_date_c")?,
            revision_count: r.or_default("revision_count_c")?,
            created_at: r.created()?,
        })
    }
}

impl RemoteRecord for Message {
    const TABLE: &'static str = "message_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "content_c",
        "sender_id_c",
        "sender_name_c",
        "timestamp_c",
        "attachments_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateMessageRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("content_c", &request.content)?;
        w.put("sender_id_c", &request.sender_id)?;
        w.put("sender_name_c", &request.sender_name)?;
        w.maybe("timestamp_c", &request.timestamp)?;
        w.put_json("attachments_c", &request.attachments)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateMessageRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("content_c", &update.content)?;
        w.maybe_json("attachments_c", &update.attachments)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        let timestamp = match r.opt("timestamp_c")? {
            Some(timestamp) => timestamp,
            None => r.created()?,
        };
        Ok(Message {
            id: r.id()?,
            content: r.text("content_c"),
            sender_id: r.text("sender_id_c"),
            sender_name: r.text("sender_name_c"),
            timestamp,
            attachments: r.json("attachments_c")?,
        })
    }
}

impl RemoteRecord for Payment {
    const TABLE: &'static str = "payment_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "description_c",
        "amount_c",
        "due_date_c",
        "status_c",
        "milestone_c",
        "type_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreatePaymentRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("description_c", &request.description)?;
        w.put("amount_c", &request.amount)?;
        w.put("due_date_c", &request.due_date)?;
        w.put("status_c", &request.status)?;
        w.put("milestone_c", &request.milestone)?;
        w.put("type_c", &request.payment_type)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdatePaymentRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("description_c", &update.description)?;
        w.maybe("amount_c", &update.amount)?;
        w.maybe("due_date_c", &update.due_date)?;
        w.maybe("status_c", &update.status)?;
        w.maybe("milestone_c", &update.milestone)?;
        w.maybe("type_c", &update.payment_type)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Payment {
            id: r.id()?,
            description: r.text("description_c"),
            amount: r.or_default("amount_c")?,
            due_date: r.get("due_date_c")?,
            status: r.or_default("status_c")?,
            milestone: r.text("milestone_c"),
            payment_type: r.or_default("type_c")?,
            created_at: r.created()?,
        })
    }
}

impl RemoteRecord for Document {
    const TABLE: &'static str = "document_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "name_c",
        "description_c",
        "category_c",
        "type_c",
        "size_c",
        "url_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateDocumentRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("name_c", &request.name)?;
        w.put("description_c", &request.description)?;
        w.put("category_c", &request.category)?;
        w.put("type_c", &request.file_type)?;
        w.put("size_c", &request.size)?;
        w.maybe("url_c", &request.url)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateDocumentRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("name_c", &update.name)?;
        w.maybe("description_c", &update.description)?;
        w.maybe("category_c", &update.category)?;
        w.maybe("type_c", &update.file_type)?;
        w.maybe("size_c", &update.size)?;
        w.maybe("url_c", &update.url)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Document {
            id: r.id()?,
            name: r.text("name_c"),
            description: r.text("description_c"),
            category: r.get("category_c")?,
            file_type: r.text("type_c"),
            size: r.or_default("size_c")?,
            uploaded_at: r.created()?,
            url: r.opt("url_c")?,
        })
    }
}

impl RemoteRecord for Brief {
    const TABLE: &'static str = "brief_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "rooms_c",
        "style_quiz_answers_c",
        "requirements_c",
        "budget_c",
        "photos_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateBriefRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put_json("rooms_c", &request.rooms)?;
        w.put_json("style_quiz_answers_c", &request.style_quiz_answers)?;
        w.put("requirements_c", &request.requirements)?;
        w.put("budget_c", &request.budget)?;
        w.put_json("photos_c", &request.photos)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateBriefRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe_json("rooms_c", &update.rooms)?;
        w.maybe_json("style_quiz_answers_c", &update.style_quiz_answers)?;
        w.maybe("requirements_c", &update.requirements)?;
        w.maybe("budget_c", &update.budget)?;
        w.maybe_json("photos_c", &update.photos)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Brief {
            id: r.id()?,
            rooms: r.json("rooms_c")?,
            style_quiz_answers: r.json("style_quiz_answers_c")?,
            requirements: r.text("requirements_c"),
            budget: r.text("budget_c"),
            photos: r.json("photos_c")?,
            created_at: r.created()?,
        })
    }
}

impl RemoteRecord for Timeline {
    const TABLE: &'static str = "timeline_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "project_id_c",
        "overall_progress_c",
        "estimated_completion_c",
        "phases_c",
        "upcoming_milestones_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateTimelineRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("project_id_c", &request.project_id)?;
        w.put("overall_progress_c", &request.overall_progress)?;
        w.put("estimated_completion_c", &request.estimated_completion)?;
        w.put_json("phases_c", &request.phases)?;
        w.put_json("upcoming_milestones_c", &request.upcoming_milestones)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateTimelineRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("project_id_c", &update.project_id)?;
        w.maybe("overall_progress_c", &update.overall_progress)?;
        w.maybe("estimated_completion_c", &update.estimated_completion)?;
        w.maybe_json("phases_c", &update.phases)?;
        w.maybe_json("upcoming_milestones_c", &update.upcoming_milestones)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Timeline {
            id: r.id()?,
            project_id: r.opt("project_id_c")?,
            overall_progress: r.or_default("overall_progress_c")?,
            estimated_completion: r.get("estimated_completion_c")?,
            phases: r.json("phases_c")?,
            upcoming_milestones: r.json("upcoming_milestones_c")?,
            created_at: r.created()?,
        })
    }
}

impl RemoteRecord for SiteVisit {
    const TABLE: &'static str = "site_visit_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "title_c",
        "description_c",
        "date_c",
        "end_date_c",
        "status_c",
        "phase_c",
        "attendees_c",
        "timeline_id_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateSiteVisitRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("title_c", &request.title)?;
        w.put("description_c", &request.description)?;
        w.put("date_c", &request.date)?;
        w.put("end_date_c", &request.end_date)?;
        w.put("status_c", &request.status.unwrap_or_default())?;
        w.put("phase_c", &request.phase)?;
        w.put_json("attendees_c", &request.attendees)?;
        w.maybe("timeline_id_c", &request.timeline_id)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateSiteVisitRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("title_c", &update.title)?;
        w.maybe("description_c", &update.description)?;
        w.maybe("date_c", &update.date)?;
        w.maybe("end_date_c", &update.end_date)?;
        w.maybe("status_c", &update.status)?;
        w.maybe("phase_c", &update.phase)?;
        w.maybe_json("attendees_c", &update.attendees)?;
        w.maybe("timeline_id_c", &update.timeline_id)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(SiteVisit {
            id: r.id()?,
            title: r.text("title_c"),
            description: r.text("description_c"),
            date: r.get("date_c")?,
            end_date: r.get("end_date_c")?,
            status: r.or_default("status_c")?,
            phase: r.text("phase_c"),
            attendees: r.json("attendees_c")?,
            timeline_id: r.opt("timeline_id_c")?,
            created_at: r.created()?,
        })
    }
}

impl RemoteRecord for Project {
    const TABLE: &'static str = "project_c";
    const FIELDS: &'static [&'static str] = &[
        ID,
        "project_name_c",
        "client_id_c",
        "designer_id_c",
        "status_c",
        "budget_c",
        "estimated_completion_c",
        "actual_completion_c",
        "description_c",
        "address_c",
        "rooms_c",
        "progress_percentage_c",
        "start_date_c",
        CREATED,
        MODIFIED,
    ];

    fn create_fields(request: &CreateProjectRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.put("project_name_c", &request.name)?;
        w.maybe("client_id_c", &request.client_id)?;
        w.maybe("designer_id_c", &request.designer_id)?;
        w.put("status_c", &request.status)?;
        w.put("budget_c", &request.budget)?;
        w.maybe("estimated_completion_c", &request.estimated_completion)?;
        w.put("description_c", &request.description)?;
        w.put("address_c", &request.address)?;
        w.put_json("rooms_c", &request.rooms)?;
        w.put("progress_percentage_c", &request.progress_percentage)?;
        w.maybe("start_date_c", &request.start_date)?;
        Ok(w.finish())
    }

    fn update_fields(update: &UpdateProjectRequest) -> ServiceResult<RecordFields> {
        let mut w = FieldWriter::new(Self::KIND);
        w.maybe("project_name_c", &update.name)?;
        w.maybe("client_id_c", &update.client_id)?;
        w.maybe("designer_id_c", &update.designer_id)?;
        w.maybe("status_c", &update.status)?;
        w.maybe("budget_c", &update.budget)?;
        w.maybe("estimated_completion_c", &update.estimated_completion)?;
        w.maybe("actual_completion_c", &update.actual_completion)?;
        w.maybe("description_c", &update.description)?;
        w.maybe("address_c", &update.address)?;
        w.maybe_json("rooms_c", &update.rooms)?;
        w.maybe("progress_percentage_c", &update.progress_percentage)?;
        w.maybe("start_date_c", &update.start_date)?;
        Ok(w.finish())
    }

    fn from_fields(fields: &RecordFields) -> ServiceResult<Self> {
        let r = FieldReader::new(Self::KIND, fields);
        Ok(Project {
            id: r.id()?,
            name: r.text("project_name_c"),
            client_id: r.opt("client_id_c")?,
            designer_id: r.opt("designer_id_c")?,
            status: r.or_default("status_c")?,
            budget: r.or_default("budget_c")?,
            estimated_completion: r.opt("estimated_completion_c")?,
            actual_completion: r.opt("actual_completion_c")?,
            description: r.text("description_c"),
            address: r.text("address_c"),
            rooms: r.json("rooms_c")?,
            progress_percentage: r.or_default("progress_percentage_c")?,
            start_date: r.opt("start_date_c")?,
            created_at: r.created()?,
            updated_at: r.modified()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ticket_nested_photos_are_json_strings() {
        let request = CreateTicketRequest {
            title: "Cracked tile".to_string(),
            description: "Bathroom floor".to_string(),
            photos: vec![Photo {
                id: 10,
                name: "tile.jpg".to_string(),
                url: "blob:abc".to_string(),
                annotations: vec![Annotation {
                    id: 11,
                    x: 0.25,
                    y: 0.5,
                    text: "Crack starts here".to_string(),
                    is_editing: false,
                }],
            }],
            ..Default::default()
        };

        let fields = Ticket::create_fields(&request).unwrap();
        assert_eq!(fields["title_c"], json!("Cracked tile"));
        assert_eq!(fields["status_c"], json!("open"));
        assert!(fields["photos_c"].is_string());
        assert!(!fields.contains_key("assigned_to_c"));
    }

    #[test]
    fn test_ticket_decodes_from_flat_fields() {
        let photos = json!([{"id": 1, "name": "a.jpg", "url": "blob:a", "annotations": []}]);
        let record = json!({
            "Id": 5,
            "title_c": "Loose handle",
            "description_c": "Wardrobe door",
            "priority_c": "critical",
            "status_c": "in-progress",
            "category_c": "carpentry",
            "photos_c": photos.to_string(),
            "assigned_to_c": null,
            "CreatedDate": "2024-01-15T10:30:00Z",
            "LastModifiedDate": "2024-01-16T08:00:00Z"
        });

        let ticket = Ticket::from_fields(record.as_object().unwrap()).unwrap();
        assert_eq!(ticket.id, 5);
        assert_eq!(ticket.priority, TicketPriority::Critical);
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.photos.len(), 1);
        assert_eq!(ticket.assigned_to, None);
        assert!(ticket.updated_at > ticket.created_at);
    }

    #[test]
    fn test_update_fields_skip_absent_values() {
        let fields = Proposal::update_fields(&UpdateProposalRequest {
            status: Some(ProposalStatus::Rejected),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields["status_c"], json!("rejected"));
    }

    #[test]
    fn test_missing_id_is_decode_error() {
        let record = json!({"title_c": "No id", "CreatedDate": "2024-01-15T10:30:00Z"});
        let err = Ticket::from_fields(record.as_object().unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::Decode { kind: EntityKind::Ticket, .. }));
    }

    #[test]
    fn test_project_uses_project_name_field() {
        let fields = Project::create_fields(&CreateProjectRequest {
            name: "Harbour Loft".to_string(),
            budget: 85000.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(fields["project_name_c"], json!("Harbour Loft"));
        assert_eq!(fields["rooms_c"], json!("[]"));
    }
}
