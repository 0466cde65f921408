use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod brief;
pub mod document;
pub mod message;
pub mod payment;
pub mod project;
pub mod proposal;
pub mod site_visit;
pub mod ticket;
pub mod timeline;

pub use brief::{Brief, BriefsResponse, CreateBriefRequest, UpdateBriefRequest};
pub use document::{
    CreateDocumentRequest, Document, DocumentCategory, DocumentsResponse, UpdateDocumentRequest,
};
pub use message::{
    CreateMessageRequest, Message, MessageAttachment, MessagesResponse, UpdateMessageRequest,
};
pub use payment::{
    CreatePaymentRequest, Payment, PaymentStatus, PaymentSummary, PaymentType, PaymentsResponse,
    UpdatePaymentRequest,
};
pub use project::{
    CreateProjectRequest, Project, ProjectStatus, ProjectsResponse, UpdateProjectRequest,
};
pub use proposal::{
    CreateProposalRequest, FurnitureItem, Proposal, ProposalComment, ProposalStatus,
    ProposalsResponse, UpdateProposalRequest,
};
pub use site_visit::{
    CreateSiteVisitRequest, SiteVisit, SiteVisitStatus, SiteVisitsResponse,
    UpdateSiteVisitRequest,
};
pub use ticket::{
    Annotation, CreateTicketRequest, Photo, Ticket, TicketPriority, TicketStatus,
    TicketsResponse, UpdateTicketRequest,
};
pub use timeline::{
    CreateTimelineRequest, Milestone, Phase, PhaseStatus, PhaseTask, Timeline,
    TimelinesResponse, UpdateTimelineRequest,
};

/// Error response for API endpoints
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
