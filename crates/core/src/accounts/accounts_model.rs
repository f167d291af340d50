//! Managed account domain models.

use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::activities::{AccountSnapshot, Cashflow, Trade};
use crate::errors::ValidationError;
use crate::payments::PaymentRecord;
use crate::Result;

/// Terminal connection state reported by the VPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConnectionStatus {
    #[serde(rename = "Connected", alias = "CONNECTED")]
    Connected,
    #[serde(rename = "No Market", alias = "NO_MARKET")]
    NoMarket,
    #[serde(rename = "Busy", alias = "BUSY")]
    Busy,
    #[default]
    #[serde(rename = "Disconnected", alias = "DISCONNECTED")]
    Disconnected,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::NoMarket => "No Market",
            ConnectionStatus::Busy => "Busy",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "MT4")]
    Mt4,
    #[serde(rename = "MT5")]
    Mt5,
}

/// How often the client is invoiced. Informational only; accruals do not
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SettlementFrequency {
    #[serde(rename = "Weekly", alias = "WEEKLY")]
    Weekly,
    #[serde(rename = "Bi-Weekly", alias = "BI_WEEKLY")]
    BiWeekly,
    #[default]
    #[serde(rename = "Monthly", alias = "MONTHLY")]
    Monthly,
}

/// Commercial terms agreed with the account owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutStructure {
    /// Share of positive net PnL owed to the house, in percent (30 = 30%).
    pub pnl_share_percent: Decimal,
    /// Flat rebate earned per lot traded.
    pub rebate_per_lot: Decimal,
    #[serde(default)]
    pub frequency: SettlementFrequency,
}

impl PayoutStructure {
    pub fn new(pnl_share_percent: Decimal, rebate_per_lot: Decimal) -> Self {
        Self {
            pnl_share_percent,
            rebate_per_lot,
            frequency: SettlementFrequency::default(),
        }
    }

    /// Profit share owed on `net_pnl`. Losses never produce a negative fee.
    pub fn profit_share_on(&self, net_pnl: Decimal) -> Decimal {
        if net_pnl > Decimal::zero() {
            net_pnl * self.pnl_share_percent / Decimal::ONE_HUNDRED
        } else {
            Decimal::zero()
        }
    }

    /// Volume rebate owed on `lots`, independent of PnL.
    pub fn rebate_on(&self, lots: Decimal) -> Decimal {
        lots * self.rebate_per_lot
    }

    pub fn validate(&self) -> Result<()> {
        if self.pnl_share_percent < Decimal::zero()
            || self.pnl_share_percent > Decimal::ONE_HUNDRED
        {
            return Err(ValidationError::ProfitShareOutOfRange(
                self.pnl_share_percent.to_string(),
            )
            .into());
        }
        if self.rebate_per_lot < Decimal::zero() {
            return Err(ValidationError::NegativeRebateRate(self.rebate_per_lot.to_string()).into());
        }
        Ok(())
    }
}

/// A third-party trading account operated by the desk.
///
/// Trade, cashflow, snapshot and payment histories belong to this account
/// alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedAccount {
    pub id: String,
    pub name: String,
    pub broker: String,
    /// Broker server, e.g. "Pepperstone-Live4"
    pub server: String,
    /// Hosting node, e.g. "Zurich-HFT-01"
    pub vps_name: String,
    pub platform: Platform,
    pub account_number: String,
    #[serde(default)]
    pub status: ConnectionStatus,
    #[serde(default)]
    pub strategy_tag: String,

    // Live metrics
    pub balance: Decimal,
    pub equity: Decimal,
    pub margin_percent: Decimal,
    #[serde(rename = "currentDDPercent")]
    pub current_drawdown_percent: Decimal,
    #[serde(rename = "livePnL")]
    pub live_pnl: Decimal,
    #[serde(default)]
    pub buy_positions_count: u32,
    #[serde(default)]
    pub buy_lots_total: Decimal,
    #[serde(default)]
    pub sell_positions_count: u32,
    #[serde(default)]
    pub sell_lots_total: Decimal,

    // History
    #[serde(default)]
    pub trades: Vec<Trade>,
    #[serde(default)]
    pub cashflows: Vec<Cashflow>,
    #[serde(default)]
    pub snapshots: Vec<AccountSnapshot>,

    pub payout_structure: PayoutStructure,
    #[serde(default)]
    pub payment_history: Vec<PaymentRecord>,
}

impl ManagedAccount {
    /// Worst drawdown ever recorded: every snapshot plus the live figure.
    pub fn lifetime_max_drawdown(&self) -> Decimal {
        self.snapshots
            .iter()
            .map(|s| s.drawdown_percent)
            .fold(self.current_drawdown_percent, Decimal::max)
    }

    pub fn open_positions_count(&self) -> u32 {
        self.buy_positions_count + self.sell_positions_count
    }

    pub fn open_lots_total(&self) -> Decimal {
        self.buy_lots_total + self.sell_lots_total
    }

    /// Validates the payout terms and every owned record.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidInput("Account id cannot be empty".to_string()).into());
        }
        self.payout_structure.validate()?;
        for trade in &self.trades {
            trade.validate()?;
        }
        for cashflow in &self.cashflows {
            cashflow.validate()?;
        }
        Ok(())
    }
}
