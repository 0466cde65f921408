use serde::Serialize;
use shared_types::{
    DocumentCategory, PaymentStatus, PhaseStatus, ProposalStatus, SiteVisitStatus, TicketPriority,
    TicketStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeVariant {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub variant: BadgeVariant,
}

impl Badge {
    /// Upper-cases `value` and turns dashes into spaces: `in-progress` is
    /// shown as `IN PROGRESS`.
    pub fn new(value: &str, variant: BadgeVariant) -> Self {
        Self {
            label: value.replace('-', " ").to_uppercase(),
            variant,
        }
    }
}

/// Status-like values that render as a badge
pub trait ToBadge {
    fn badge(&self) -> Badge;
}

impl ToBadge for TicketPriority {
    fn badge(&self) -> Badge {
        let variant = match self {
            TicketPriority::Low => BadgeVariant::Success,
            TicketPriority::Medium => BadgeVariant::Info,
            TicketPriority::High => BadgeVariant::Warning,
            TicketPriority::Critical => BadgeVariant::Error,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for TicketStatus {
    fn badge(&self) -> Badge {
        let variant = match self {
            TicketStatus::Open => BadgeVariant::Info,
            TicketStatus::InProgress => BadgeVariant::Primary,
            TicketStatus::Resolved => BadgeVariant::Success,
            TicketStatus::Closed => BadgeVariant::Default,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for PaymentStatus {
    fn badge(&self) -> Badge {
        let variant = match self {
            PaymentStatus::Paid => BadgeVariant::Success,
            PaymentStatus::Pending => BadgeVariant::Warning,
            PaymentStatus::Overdue => BadgeVariant::Error,
            PaymentStatus::Scheduled => BadgeVariant::Info,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for DocumentCategory {
    fn badge(&self) -> Badge {
        let variant = match self {
            DocumentCategory::Quotes | DocumentCategory::Photos => BadgeVariant::Info,
            DocumentCategory::Drawings => BadgeVariant::Success,
            DocumentCategory::Contracts => BadgeVariant::Warning,
            DocumentCategory::Warranties => BadgeVariant::Default,
            DocumentCategory::Invoices => BadgeVariant::Error,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for ProposalStatus {
    fn badge(&self) -> Badge {
        let variant = match self {
            ProposalStatus::Approved => BadgeVariant::Success,
            ProposalStatus::Rejected => BadgeVariant::Error,
            ProposalStatus::Pending => BadgeVariant::Warning,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for SiteVisitStatus {
    fn badge(&self) -> Badge {
        let variant = match self {
            SiteVisitStatus::Confirmed => BadgeVariant::Success,
            SiteVisitStatus::Scheduled => BadgeVariant::Warning,
            SiteVisitStatus::Completed => BadgeVariant::Info,
            SiteVisitStatus::Cancelled => BadgeVariant::Error,
        };
        Badge::new(self.as_str(), variant)
    }
}

impl ToBadge for PhaseStatus {
    fn badge(&self) -> Badge {
        let (label, variant) = match self {
            PhaseStatus::Completed => ("completed", BadgeVariant::Success),
            PhaseStatus::InProgress => ("in-progress", BadgeVariant::Warning),
            PhaseStatus::Pending => ("pending", BadgeVariant::Default),
        };
        Badge::new(label, variant)
    }
}
