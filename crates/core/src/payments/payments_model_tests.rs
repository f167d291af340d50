//! Tests for payment records.

#[cfg(test)]
mod tests {
    use crate::payments::{PaymentKind, PaymentRecord, PaymentStatus};
    use crate::testing::{date, ts};
    use crate::window::TimedEvent;
    use rust_decimal_macros::dec;

    #[test]
    fn test_outstanding_statuses() {
        assert!(!PaymentStatus::Paid.is_outstanding());
        assert!(PaymentStatus::Pending.is_outstanding());
        assert!(PaymentStatus::Overdue.is_outstanding());
    }

    #[test]
    fn test_due_date_resolves_to_local_midnight() {
        let record = PaymentRecord {
            id: "P-1".to_string(),
            kind: PaymentKind::Rebate,
            amount: dec!(120),
            due_date: date("2024-07-01"),
            status: PaymentStatus::Pending,
            period_label: "June 2024".to_string(),
        };
        assert_eq!(record.event_time(chrono_tz::UTC), ts("2024-07-01T00:00:00Z"));
        assert_eq!(
            record.event_time(chrono_tz::Europe::Berlin),
            ts("2024-06-30T22:00:00Z")
        );
    }

    #[test]
    fn test_dashboard_json() {
        let json = r#"{
            "id": "pay-7",
            "type": "PNL_SHARE",
            "amount": 1540.25,
            "dueDate": "2024-06-01",
            "status": "OVERDUE",
            "periodLabel": "May 2024"
        }"#;
        let record: PaymentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, PaymentKind::PnlShare);
        assert_eq!(record.amount, dec!(1540.25));
        assert_eq!(record.due_date, date("2024-06-01"));
        assert_eq!(record.status, PaymentStatus::Overdue);
        assert_eq!(PaymentStatus::Overdue.as_str(), "OVERDUE");
    }
}
