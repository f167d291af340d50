use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fees earned on a set of trades over one window.
///
/// `profit_share` is gated on the cumulative `net_pnl` of the whole window,
/// so losing trades offset winning ones before the share is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccrualSummary {
    #[serde(rename = "netPnL")]
    pub net_pnl: Decimal,
    pub lots_traded: Decimal,
    pub trade_count: usize,
    pub profit_share: Decimal,
    pub rebate: Decimal,
    pub total_accrued: Decimal,
}

impl AccrualSummary {
    /// Adds another account's accrual. Each side keeps the gating it was
    /// computed with, so the combined share is not re-gated.
    pub fn combine(&mut self, other: &AccrualSummary) {
        self.net_pnl += other.net_pnl;
        self.lots_traded += other.lots_traded;
        self.trade_count += other.trade_count;
        self.profit_share += other.profit_share;
        self.rebate += other.rebate;
        self.total_accrued += other.total_accrued;
    }
}
