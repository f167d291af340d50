//! Rollup module - cross-account summaries, breakdowns and ledgers.

mod rollup_model;
mod rollup_service;

#[cfg(test)]
mod rollup_service_tests;

pub use rollup_model::{
    AccountBreakdown, AccountOverview, CapitalFlowSummary, PaymentLedgerRow, PaymentLedgerSummary,
    PortfolioSummary,
};
pub use rollup_service::{
    account_breakdowns, account_overviews, capital_flows, max_drawdown_in_window,
    payment_ledger, payment_ledger_summary, summarize, total_accrual,
};
