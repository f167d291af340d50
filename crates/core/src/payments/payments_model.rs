//! Invoice lines billed to managed-account clients.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::start_of_local_day;
use crate::window::TimedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    PnlShare,
    Rebate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Overdue => "OVERDUE",
        }
    }

    /// Anything not yet paid is still owed, overdue or not.
    pub fn is_outstanding(&self) -> bool {
        !matches!(self, PaymentStatus::Paid)
    }
}

/// A settled or scheduled invoice line.
///
/// Independent of live trade data: its place in a window is decided by the
/// due date alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub period_label: String,
}

impl TimedEvent for PaymentRecord {
    fn event_time(&self, tz: Tz) -> DateTime<Utc> {
        start_of_local_day(self.due_date, tz)
    }
}
