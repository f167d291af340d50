//! Accrual module - profit share and rebate earned over a window.

mod accrual_calculator;
mod accrual_model;

pub use accrual_calculator::{accrue, accrue_account};
pub use accrual_model::AccrualSummary;
