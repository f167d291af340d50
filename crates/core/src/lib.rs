//! PayoutWatch Core - temporal aggregation and payout accrual for managed
//! trading accounts.
//!
//! The crate turns trade, cashflow, snapshot and payment histories into
//! windowed totals, bucketed series and fee accruals. It holds no state and
//! performs no I/O: every call takes its inputs, a [`TimeWindow`] and a
//! [`ReportingClock`], and returns plain data.

pub mod accounts;
pub mod activities;
pub mod errors;
pub mod payments;
pub mod portfolio;
pub mod settings;
pub mod table;
pub mod utils;
pub mod window;

#[cfg(test)]
mod testing;

pub use portfolio::*;
pub use settings::EngineSettings;
pub use utils::ReportingClock;
pub use window::{TimeWindow, TimedEvent, WindowKind};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
