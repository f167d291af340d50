//! Portfolio module - bucketing, series, accruals and cross-account rollups.

pub mod accrual;
pub mod buckets;
pub mod rollup;
pub mod series;

pub use accrual::{accrue, accrue_account, AccrualSummary};
pub use buckets::{derive_key, BucketKey, BucketSortKey, Granularity};
pub use rollup::{
    account_breakdowns, account_overviews, capital_flows, payment_ledger, payment_ledger_summary,
    summarize, AccountBreakdown, AccountOverview, CapitalFlowSummary, PaymentLedgerRow,
    PaymentLedgerSummary, PortfolioSummary,
};
