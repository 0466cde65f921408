//! Error taxonomy shared by every entity service and page.
//!
//! - `NotFound`: lookup by id failed
//! - `Validation`: required input missing, caught before any mutating call
//! - `Remote`: the record store reported a failure
//! - `Decode`: a record came back in a shape the mapping cannot read

use std::fmt;
use thiserror::Error;

/// The nine entity types the portal manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ticket,
    Proposal,
    Message,
    Payment,
    Document,
    Brief,
    Timeline,
    SiteVisit,
    Project,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Ticket => "Ticket",
            EntityKind::Proposal => "Proposal",
            EntityKind::Message => "Message",
            EntityKind::Payment => "Payment",
            EntityKind::Document => "Document",
            EntityKind::Brief => "Brief",
            EntityKind::Timeline => "Timeline",
            EntityKind::SiteVisit => "Site visit",
            EntityKind::Project => "Project",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(EntityKind),

    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("Failed to decode {kind} record: {message}")]
    Decode { kind: EntityKind, message: String },
}

impl ServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn decode(kind: EntityKind, message: impl Into<String>) -> Self {
        ServiceError::Decode {
            kind,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation { .. })
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
