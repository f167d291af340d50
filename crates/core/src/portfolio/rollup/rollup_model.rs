use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{ConnectionStatus, Platform};
use crate::payments::{PaymentKind, PaymentStatus};
use crate::portfolio::accrual::AccrualSummary;
use chrono::NaiveDate;

/// Deposits and withdrawals inside a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFlowSummary {
    pub deposits: Decimal,
    pub withdrawals: Decimal,
    pub net_flow: Decimal,
    pub cashflow_count: usize,
}

/// Portfolio-wide headline figures.
///
/// Balance, equity and live PnL are current readings and ignore the window.
/// Everything under `realized`, the drawdown and the capital flows are
/// restricted to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub account_count: usize,
    pub total_balance: Decimal,
    pub total_equity: Decimal,
    #[serde(rename = "totalLivePnL")]
    pub total_live_pnl: Decimal,
    pub realized: AccrualSummary,
    pub max_drawdown_percent: Decimal,
    pub capital_flows: CapitalFlowSummary,
}

/// One row of the client accruals table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBreakdown {
    pub account_id: String,
    pub name: String,
    pub account_number: String,
    pub broker: String,
    pub pnl_share_percent: Decimal,
    pub rebate_per_lot: Decimal,
    pub accrual: AccrualSummary,
    pub max_drawdown_percent: Decimal,
}

/// Collected versus outstanding fees over the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLedgerSummary {
    pub collected_total: Decimal,
    pub collected_pnl_share: Decimal,
    pub collected_rebate: Decimal,
    pub pending_total: Decimal,
    /// Part of `pending_total` already past due.
    pub overdue_total: Decimal,
    /// Lots implied by the collected rebates at each account's rate.
    pub paid_lots: Decimal,
    /// Percent of billed fees already collected.
    pub collection_rate: Decimal,
    pub record_count: usize,
}

/// A payment record flattened with the account that owes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLedgerRow {
    pub payment_id: String,
    pub account_id: String,
    pub account_name: String,
    pub account_number: String,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub period_label: String,
    pub pnl_share_percent: Decimal,
    pub rebate_per_lot: Decimal,
}

/// One row of the accounts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOverview {
    pub account_id: String,
    pub name: String,
    pub account_number: String,
    pub broker: String,
    pub server: String,
    pub vps_name: String,
    pub platform: Platform,
    pub status: ConnectionStatus,
    pub balance: Decimal,
    pub equity: Decimal,
    pub margin_percent: Decimal,
    #[serde(rename = "livePnL")]
    pub live_pnl: Decimal,
    pub open_positions: u32,
    pub open_lots: Decimal,
    #[serde(rename = "currentDDPercent")]
    pub current_drawdown_percent: Decimal,
    #[serde(rename = "maxDD")]
    pub max_drawdown_percent: Decimal,
}
