use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    Scheduled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of payment in the billing schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentType {
    Deposit,
    #[default]
    Milestone,
    Final,
    Other,
}

/// A single payment in the project billing schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub milestone: String,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub created_at: DateTime<Utc>,
}

/// Request to create a payment
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatePaymentRequest {
    pub description: String,
    pub amount: f64,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub milestone: String,
    #[serde(rename = "type", default)]
    pub payment_type: PaymentType,
}

/// Request to update a payment
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct UpdatePaymentRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
    pub milestone: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<PaymentType>,
}

/// Totals shown at the top of the payments page
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentSummary {
    pub total_paid: f64,
    /// Pending plus overdue
    pub total_pending: f64,
    pub total_budget: f64,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        payments.iter().fold(Self::default(), |mut acc, p| {
            match p.status {
                PaymentStatus::Paid => acc.total_paid += p.amount,
                PaymentStatus::Pending | PaymentStatus::Overdue => acc.total_pending += p.amount,
                PaymentStatus::Scheduled => {}
            }
            acc.total_budget += p.amount;
            acc
        })
    }

    pub fn remaining(&self) -> f64 {
        self.total_budget - self.total_paid
    }
}

/// Response containing a list of payments
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentsResponse {
    pub payments: Vec<Payment>,
}
