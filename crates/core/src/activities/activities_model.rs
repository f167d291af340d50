//! Trading activity domain models: trades, cashflows and account snapshots.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::window::TimedEvent;
use crate::Result;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A single trade on a managed account.
///
/// Net PnL is never stored. It is always `profit + swap + commission`, so a
/// serialized `netPnL` field coming from upstream is ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    pub symbol: String,
    pub lots: Decimal,
    pub open_price: Decimal,
    #[serde(default)]
    pub close_price: Option<Decimal>,
    pub open_time: DateTime<Utc>,
    #[serde(default)]
    pub close_time: Option<DateTime<Utc>>,
    pub profit: Decimal,
    pub swap: Decimal,
    pub commission: Decimal,
}

impl Trade {
    /// Profit after swap and commission.
    pub fn net_pnl(&self) -> Decimal {
        self.profit + self.swap + self.commission
    }

    /// A trade without a close timestamp is still open.
    pub fn is_open(&self) -> bool {
        self.close_time.is_none()
    }

    /// Instant used for windowing and bucketing: close time, else open time.
    pub fn settled_at(&self) -> DateTime<Utc> {
        self.close_time.unwrap_or(self.open_time)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lots <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveLots {
                trade_id: self.id.clone(),
                lots: self.lots.to_string(),
            }
            .into());
        }
        if let Some(close_time) = self.close_time {
            if close_time < self.open_time {
                return Err(ValidationError::CloseBeforeOpen {
                    trade_id: self.id.clone(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl TimedEvent for Trade {
    fn event_time(&self, _tz: Tz) -> DateTime<Utc> {
        self.settled_at()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashflowKind {
    Deposit,
    Withdrawal,
}

/// Capital moved into or out of an account. Not part of PnL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashflow {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CashflowKind,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Cashflow {
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeCashflow {
                cashflow_id: self.id.clone(),
                amount: self.amount.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl TimedEvent for Cashflow {
    fn event_time(&self, _tz: Tz) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Point-in-time account state, used for drawdown and equity history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    pub timestamp: DateTime<Utc>,
    pub equity: Decimal,
    pub balance: Decimal,
    pub drawdown_percent: Decimal,
}

impl TimedEvent for AccountSnapshot {
    fn event_time(&self, _tz: Tz) -> DateTime<Utc> {
        self.timestamp
    }
}
