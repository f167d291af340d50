//! Payments module - invoice ledger records.

mod payments_model;

#[cfg(test)]
mod payments_model_tests;

pub use payments_model::{PaymentKind, PaymentRecord, PaymentStatus};
