//! Page view-models. Each page owns a cached copy of what it shows,
//! reloads wholesale after a mutation, and reports mutation outcomes as a
//! [`Notice`] rather than failing the whole page.

pub mod brief;
pub mod calendar;
pub mod dashboard;
pub mod documents;
pub mod messages;
pub mod payments;
pub mod proposals;
pub mod tickets;
pub mod timeline;

pub use brief::{BriefPage, QuizOption, QuizQuestion, BUDGET_RANGES, ROOM_OPTIONS, STYLE_QUIZ};
pub use calendar::{CalendarCell, CalendarPage, ScheduleForm};
pub use dashboard::DashboardPage;
pub use documents::{format_file_size, CategoryCount, DocumentsPage};
pub use messages::{MessageGroup, MessagesPage};
pub use payments::PaymentsPage;
pub use proposals::ProposalsPage;
pub use tickets::TicketsPage;
pub use timeline::{PhaseCounts, TimelinePage};

use crate::error::ServiceResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

/// The project every single-project page reads
pub const CURRENT_PROJECT_ID: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "kebab-case")]
pub enum PageState {
    Loading,
    Ready,
    Failed(String),
}

impl PageState {
    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Ready on success, otherwise the error text or `fallback` when the
    /// error has none.
    fn settle<T>(result: &ServiceResult<T>, fallback: &str) -> Self {
        match result {
            Ok(_) => PageState::Ready,
            Err(err) => {
                warn!("{}: {}", fallback, err);
                let message = err.to_string();
                if message.trim().is_empty() {
                    PageState::Failed(fallback.to_string())
                } else {
                    PageState::Failed(message)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient toast-style message left by the last mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Validation failures are shown as-is; anything else gets `failure`.
    fn outcome<T>(result: &ServiceResult<T>, success: impl Into<String>, failure: &str) -> Self {
        match result {
            Ok(_) => Notice::success(success),
            Err(err) if err.is_validation() => Notice::error(err.to_string()),
            Err(err) => {
                warn!("{}: {}", failure, err);
                Notice::error(failure)
            }
        }
    }
}

/// Whole days from `now` until `target`, rounded up. Negative once past.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY: i64 = 86_400;
    let seconds = (target - now).num_seconds();
    seconds.div_euclid(DAY) + i64::from(seconds.rem_euclid(DAY) > 0)
}

/// Dollar amount with thousands separators; cents only when present
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let (whole, fraction) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    if fraction == 0 {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{:02}", sign, grouped, fraction)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, ServiceError};
    use chrono::Duration;

    #[test]
    fn test_days_until_rounds_up() {
        let now = Utc::now();
        assert_eq!(days_until(now + Duration::hours(1), now), 1);
        assert_eq!(days_until(now + Duration::days(3), now), 3);
        assert_eq!(days_until(now + Duration::days(3) + Duration::minutes(1), now), 4);
        assert_eq!(days_until(now, now), 0);
        assert_eq!(days_until(now - Duration::hours(30), now), -1);
    }

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(12500.0), "$12,500");
        assert_eq!(format_currency(1234567.5), "$1,234,567.50");
        assert_eq!(format_currency(-2000.0), "-$2,000");
    }

    #[test]
    fn test_notice_outcome() {
        let ok: ServiceResult<()> = Ok(());
        assert_eq!(
            Notice::outcome(&ok, "Saved!", "Failed to save"),
            Notice::success("Saved!")
        );

        let invalid: ServiceResult<()> = Err(ServiceError::validation("title", "Please enter a title"));
        assert_eq!(
            Notice::outcome(&invalid, "Saved!", "Failed to save").message,
            "Please enter a title"
        );

        let missing: ServiceResult<()> = Err(ServiceError::NotFound(EntityKind::Ticket));
        assert_eq!(
            Notice::outcome(&missing, "Saved!", "Failed to save"),
            Notice::error("Failed to save")
        );
    }

    #[test]
    fn test_page_state_uses_error_text() {
        let failed: ServiceResult<()> = Err(ServiceError::Remote("connection refused".to_string()));
        let state = PageState::settle(&failed, "Failed to load tickets");
        assert_eq!(state.error(), Some("Remote store error: connection refused"));
        assert!(PageState::settle(&Ok(()), "x").is_ready());
    }
}
