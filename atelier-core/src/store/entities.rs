//! How each domain record is built from a create request and merged with a
//! partial update. Shared by both store adapters.

use super::Entity;
use crate::error::EntityKind;
use chrono::{DateTime, Utc};
use shared_types::*;

fn set<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

fn set_some<T>(field: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *field = value;
    }
}

impl Entity for Ticket {
    type Create = CreateTicketRequest;
    type Update = UpdateTicketRequest;
    const KIND: EntityKind = EntityKind::Ticket;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateTicketRequest, now: DateTime<Utc>) -> Self {
        Ticket {
            id,
            title: request.title,
            description: request.description,
            priority: request.priority,
            status: request.status.unwrap_or_default(),
            category: request.category,
            photos: request.photos,
            assigned_to: request.assigned_to,
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, update: UpdateTicketRequest, now: DateTime<Utc>) {
        set(&mut self.title, update.title);
        set(&mut self.description, update.description);
        set(&mut self.priority, update.priority);
        set(&mut self.status, update.status);
        set(&mut self.category, update.category);
        set(&mut self.photos, update.photos);
        set_some(&mut self.assigned_to, update.assigned_to);
        self.updated_at = now;
    }
}

impl Entity for Proposal {
    type Create = CreateProposalRequest;
    type Update = UpdateProposalRequest;
    const KIND: EntityKind = EntityKind::Proposal;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateProposalRequest, now: DateTime<Utc>) -> Self {
        Proposal {
            id,
            room_name: request.room_name,
            preview_image: request.preview_image,
            color_palette: request.color_palette,
            total_cost: request.total_cost,
            status: request.status.unwrap_or_default(),
            furniture: request.furniture,
            comments: request.comments,
            room_id: request.room_id,
            client_feedback: request.client_feedback,
            designer_notes: request.designer_notes,
            approval_date: None,
            revision_count: 0,
            created_at: now,
        }
    }

    fn merge(&mut self, update: UpdateProposalRequest, _now: DateTime<Utc>) {
        set(&mut self.room_name, update.room_name);
        set(&mut self.preview_image, update.preview_image);
        set(&mut self.color_palette, update.color_palette);
        set(&mut self.total_cost, update.total_cost);
        set(&mut self.status, update.status);
        set(&mut self.furniture, update.furniture);
        set(&mut self.comments, update.comments);
        set_some(&mut self.room_id, update.room_id);
        set_some(&mut self.client_feedback, update.client_feedback);
        set_some(&mut self.designer_notes, update.designer_notes);
        set_some(&mut self.approval_date, update.approval_date);
        set(&mut self.revision_count, update.revision_count);
    }
}

impl Entity for Message {
    type Create = CreateMessageRequest;
    type Update = UpdateMessageRequest;
    const KIND: EntityKind = EntityKind::Message;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateMessageRequest, now: DateTime<Utc>) -> Self {
        Message {
            id,
            content: request.content,
            sender_id: request.sender_id,
            sender_name: request.sender_name,
            timestamp: request.timestamp.unwrap_or(now),
            attachments: request.attachments,
        }
    }

    fn merge(&mut self, update: UpdateMessageRequest, _now: DateTime<Utc>) {
        set(&mut self.content, update.content);
        set(&mut self.attachments, update.attachments);
    }
}

impl Entity for Payment {
    type Create = CreatePaymentRequest;
    type Update = UpdatePaymentRequest;
    const KIND: EntityKind = EntityKind::Payment;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreatePaymentRequest, now: DateTime<Utc>) -> Self {
        Payment {
            id,
            description: request.description,
            amount: request.amount,
            due_date: request.due_date,
            status: request.status,
            milestone: request.milestone,
            payment_type: request.payment_type,
            created_at: now,
        }
    }

    fn merge(&mut self, update: UpdatePaymentRequest, _now: DateTime<Utc>) {
        set(&mut self.description, update.description);
        set(&mut self.amount, update.amount);
        set(&mut self.due_date, update.due_date);
        set(&mut self.status, update.status);
        set(&mut self.milestone, update.milestone);
        set(&mut self.payment_type, update.payment_type);
    }
}

impl Entity for Document {
    type Create = CreateDocumentRequest;
    type Update = UpdateDocumentRequest;
    const KIND: EntityKind = EntityKind::Document;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateDocumentRequest, now: DateTime<Utc>) -> Self {
        Document {
            id,
            name: request.name,
            description: request.description,
            category: request.category,
            file_type: request.file_type,
            size: request.size,
            uploaded_at: now,
            url: request.url,
        }
    }

    fn merge(&mut self, update: UpdateDocumentRequest, _now: DateTime<Utc>) {
        set(&mut self.name, update.name);
        set(&mut self.description, update.description);
        set(&mut self.category, update.category);
        set(&mut self.file_type, update.file_type);
        set(&mut self.size, update.size);
        set_some(&mut self.url, update.url);
    }
}

impl Entity for Brief {
    type Create = CreateBriefRequest;
    type Update = UpdateBriefRequest;
    const KIND: EntityKind = EntityKind::Brief;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateBriefRequest, now: DateTime<Utc>) -> Self {
        Brief {
            id,
            rooms: request.rooms,
            style_quiz_answers: request.style_quiz_answers,
            requirements: request.requirements,
            budget: request.budget,
            photos: request.photos,
            created_at: now,
        }
    }

    fn merge(&mut self, update: UpdateBriefRequest, _now: DateTime<Utc>) {
        set(&mut self.rooms, update.rooms);
        set(&mut self.style_quiz_answers, update.style_quiz_answers);
        set(&mut self.requirements, update.requirements);
        set(&mut self.budget, update.budget);
        set(&mut self.photos, update.photos);
    }
}

impl Entity for Timeline {
    type Create = CreateTimelineRequest;
    type Update = UpdateTimelineRequest;
    const KIND: EntityKind = EntityKind::Timeline;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateTimelineRequest, now: DateTime<Utc>) -> Self {
        Timeline {
            id,
            project_id: request.project_id,
            overall_progress: request.overall_progress,
            estimated_completion: request.estimated_completion,
            phases: request.phases,
            upcoming_milestones: request.upcoming_milestones,
            created_at: now,
        }
    }

    fn merge(&mut self, update: UpdateTimelineRequest, _now: DateTime<Utc>) {
        set_some(&mut self.project_id, update.project_id);
        set(&mut self.overall_progress, update.overall_progress);
        set(&mut self.estimated_completion, update.estimated_completion);
        set(&mut self.phases, update.phases);
        set(&mut self.upcoming_milestones, update.upcoming_milestones);
    }
}

impl Entity for SiteVisit {
    type Create = CreateSiteVisitRequest;
    type Update = UpdateSiteVisitRequest;
    const KIND: EntityKind = EntityKind::SiteVisit;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateSiteVisitRequest, now: DateTime<Utc>) -> Self {
        SiteVisit {
            id,
            title: request.title,
            description: request.description,
            date: request.date,
            end_date: request.end_date,
            status: request.status.unwrap_or_default(),
            phase: request.phase,
            attendees: request.attendees,
            timeline_id: request.timeline_id,
            created_at: now,
        }
    }

    fn merge(&mut self, update: UpdateSiteVisitRequest, _now: DateTime<Utc>) {
        set(&mut self.title, update.title);
        set(&mut self.description, update.description);
        set(&mut self.date, update.date);
        set(&mut self.end_date, update.end_date);
        set(&mut self.status, update.status);
        set(&mut self.phase, update.phase);
        set(&mut self.attendees, update.attendees);
        set_some(&mut self.timeline_id, update.timeline_id);
    }
}

impl Entity for Project {
    type Create = CreateProjectRequest;
    type Update = UpdateProjectRequest;
    const KIND: EntityKind = EntityKind::Project;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, request: CreateProjectRequest, now: DateTime<Utc>) -> Self {
        Project {
            id,
            name: request.name,
            client_id: request.client_id,
            designer_id: request.designer_id,
            status: request.status,
            budget: request.budget,
            estimated_completion: request.estimated_completion,
            actual_completion: None,
            description: request.description,
            address: request.address,
            rooms: request.rooms,
            progress_percentage: request.progress_percentage,
            start_date: request.start_date,
            created_at: now,
            updated_at: now,
        }
    }

    fn merge(&mut self, update: UpdateProjectRequest, now: DateTime<Utc>) {
        set(&mut self.name, update.name);
        set_some(&mut self.client_id, update.client_id);
        set_some(&mut self.designer_id, update.designer_id);
        set(&mut self.status, update.status);
        set(&mut self.budget, update.budget);
        set_some(&mut self.estimated_completion, update.estimated_completion);
        set_some(&mut self.actual_completion, update.actual_completion);
        set(&mut self.description, update.description);
        set(&mut self.address, update.address);
        set(&mut self.rooms, update.rooms);
        set(&mut self.progress_percentage, update.progress_percentage);
        set_some(&mut self.start_date, update.start_date);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_ticket_build_defaults_status_to_open() {
        let now = Utc::now();
        let ticket = Ticket::build(
            7,
            CreateTicketRequest {
                title: "Leaky faucet".to_string(),
                description: "Kitchen sink drips".to_string(),
                priority: TicketPriority::High,
                ..Default::default()
            },
            now,
        );

        assert_eq!(ticket.id, 7);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.created_at, now);
        assert_eq!(ticket.updated_at, now);
    }

    #[test]
    fn test_ticket_merge_only_touches_given_fields() {
        let created = Utc::now();
        let mut ticket = Ticket::build(
            1,
            CreateTicketRequest {
                title: "Scuffed wall".to_string(),
                description: "Hallway".to_string(),
                category: "painting".to_string(),
                ..Default::default()
            },
            created,
        );

        let later = created + Duration::minutes(5);
        ticket.merge(
            UpdateTicketRequest {
                status: Some(TicketStatus::Resolved),
                ..Default::default()
            },
            later,
        );

        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.title, "Scuffed wall");
        assert_eq!(ticket.category, "painting");
        assert_eq!(ticket.created_at, created);
        assert_eq!(ticket.updated_at, later);
    }

    #[test]
    fn test_proposal_merge_keeps_optional_fields_when_absent() {
        let mut proposal = Proposal::build(
            2,
            CreateProposalRequest {
                room_name: "Living Room".to_string(),
                total_cost: 12000.0,
                designer_notes: Some("Warm oak".to_string()),
                ..Default::default()
            },
            Utc::now(),
        );

        proposal.merge(
            UpdateProposalRequest {
                status: Some(ProposalStatus::Approved),
                ..Default::default()
            },
            Utc::now(),
        );

        assert_eq!(proposal.status, ProposalStatus::Approved);
        assert_eq!(proposal.designer_notes.as_deref(), Some("Warm oak"));
    }
}
