use super::{days_until, Notice, PageState};
use crate::error::ServiceResult;
use crate::store::{PaymentQueries, Services};
use chrono::{DateTime, Utc};
use shared_types::{Payment, PaymentStatus, PaymentSummary, PaymentType, UpdatePaymentRequest};
use tracing::info;

pub fn payment_icon(payment_type: PaymentType) -> &'static str {
    match payment_type {
        PaymentType::Deposit => "DollarSign",
        PaymentType::Milestone => "Flag",
        PaymentType::Final => "CheckCircle",
        PaymentType::Other => "CreditCard",
    }
}

/// "Overdue" for overdue payments, otherwise the whole days left
pub fn due_label(payment: &Payment, now: DateTime<Utc>) -> String {
    match payment.status {
        PaymentStatus::Overdue => "Overdue".to_string(),
        _ => format!("{} days", days_until(payment.due_date, now)),
    }
}

pub struct PaymentsPage {
    services: Services,
    pub state: PageState,
    pub notice: Option<Notice>,
    pub payments: Vec<Payment>,
    pub summary: PaymentSummary,
    selected: Option<i64>,
}

impl PaymentsPage {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            state: PageState::Loading,
            notice: None,
            payments: Vec::new(),
            summary: PaymentSummary::default(),
            selected: None,
        }
    }

    pub async fn load(&mut self) {
        self.state = PageState::Loading;
        let result = futures::try_join!(
            self.services.payments.get_all(),
            self.services.payments.summary(),
        );
        self.state = PageState::settle(&result, "Failed to load payment data");
        if let Ok((payments, summary)) = result {
            self.payments = payments;
            self.summary = summary;
        }
    }

    pub async fn retry(&mut self) {
        self.load().await
    }

    pub fn remaining(&self) -> f64 {
        self.summary.remaining()
    }

    pub fn days_until_due(&self, id: i64, now: DateTime<Utc>) -> Option<i64> {
        self.payments
            .iter()
            .find(|p| p.id == id)
            .map(|p| days_until(p.due_date, now))
    }

    pub fn select(&mut self, id: Option<i64>) {
        self.selected = id.filter(|id| self.payments.iter().any(|p| p.id == *id));
    }

    pub fn selected(&self) -> Option<&Payment> {
        let id = self.selected?;
        self.payments.iter().find(|p| p.id == id)
    }

    /// Records the payment as paid and refreshes the totals
    pub async fn pay(&mut self, id: i64) -> ServiceResult<Payment> {
        let update = UpdatePaymentRequest {
            status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        let result = self.services.payments.update(id, update).await;
        self.notice = Some(Notice::outcome(
            &result,
            "Payment completed successfully!",
            "Payment failed",
        ));
        if let Ok(payment) = &result {
            info!("Payment {} of {} completed", payment.id, payment.amount);
            self.selected = None;
            self.load().await;
        }
        result
    }
}
